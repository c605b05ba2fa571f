// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two ring-reduction passes.

use alloc::vec;
use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Douglas-Peucker reduction of an ordered point sequence.
///
/// Keeps the first and last points, then recursively keeps the point with
/// the maximum perpendicular distance from the chord between the current
/// endpoints whenever that distance exceeds `epsilon`. Inputs with fewer
/// than 3 points are returned unchanged; the result always has at least 2
/// points and preserves input order.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![0, last];
    simplify_section(points, 0, last, epsilon, &mut keep);
    keep.sort_unstable();
    keep.into_iter().map(|i| points[i]).collect()
}

fn simplify_section(points: &[Point], first: usize, last: usize, epsilon: f64, keep: &mut Vec<usize>) {
    let mut max_dist = 0.0;
    let mut index = first;

    for i in first + 1..last {
        let dist = perpendicular_distance(points[i], points[first], points[last]);
        if dist > max_dist {
            index = i;
            max_dist = dist;
        }
    }

    if max_dist > epsilon {
        keep.push(index);
        simplify_section(points, first, index, epsilon, keep);
        simplify_section(points, index, last, epsilon, keep);
    }
}

/// Distance from `pt` to the infinite line through `a` and `b`, via
/// projection. A zero-length chord yields 0, so all interior points of a
/// degenerate section are dropped.
fn perpendicular_distance(pt: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return 0.0;
    }

    let u = ((pt.x - a.x) * dx + (pt.y - a.y) * dy) / len2;
    let proj_x = a.x + u * dx;
    let proj_y = a.y + u * dy;
    let ox = pt.x - proj_x;
    let oy = pt.y - proj_y;
    (ox * ox + oy * oy).sqrt()
}

/// Proportion-based reduction: drop middle points that barely deviate from
/// the chord of their neighbors.
///
/// Scans consecutive triples `(p[i], p[i+1], p[i+2])`; when the ratio of
/// the middle point's distance from the chord midpoint to the chord length
/// falls below `prop`, the middle point is dropped and the same index is
/// retried, so runs of near-collinear points collapse in one pass. If the
/// reduced ring would end up with fewer than 3 points, the input is
/// returned unmodified.
pub fn simplify_by_proportion(points: &[Point], prop: f64) -> Vec<Point> {
    let mut p = points.to_vec();
    let mut i = 0;
    while i + 2 < p.len() {
        if chord_proportion(p[i], p[i + 1], p[i + 2]) < prop {
            let _ = p.remove(i + 1);
        } else {
            i += 1;
        }
    }

    if p.len() >= 3 { p } else { points.to_vec() }
}

/// Ratio of the middle point's offset from the chord midpoint to the chord
/// length. A zero-length chord keeps the middle point.
fn chord_proportion(p0: Point, p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p0.x;
    let dy = p2.y - p0.y;
    let denominator = dx * dx + dy * dy;
    if denominator == 0.0 {
        return f64::INFINITY;
    }

    let mid_x = p0.x + dx / 2.0;
    let mid_y = p0.y + dy / 2.0;
    let numerator = (p1.x - mid_x) * (p1.x - mid_x) + (p1.y - mid_y) * (p1.y - mid_y);
    (numerator / denominator).sqrt()
}
