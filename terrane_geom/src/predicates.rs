// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure geometry predicates: segment intersection, point-in-polygon,
//! polygon/rectangle relations.
//!
//! These are the narrow-phase tests behind the containment tree's queries.
//! They favor the cheap, approximate forms appropriate to cursor picking:
//! polygon/rectangle containment is judged by point membership rather than
//! exact region algebra.

use kurbo::{Point, Rect};

use crate::Geometry;
use crate::rect::{contains_point, corners, edges};

/// Offset applied to the sampled y when a ray endpoint tie would make the
/// even-odd crossing count ambiguous.
const RAY_NUDGE: f64 = 1e-5;

/// Whether segments `a1..a2` and `b1..b2` intersect.
///
/// Uses the orientation-sign test; segments that share an endpoint or
/// overlap collinearly count as intersecting via the on-segment bounds
/// check.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if d1 != d2 && d3 != d4 {
        return true;
    }

    (d1 == 0 && on_segment(b1, b2, a1))
        || (d2 == 0 && on_segment(b1, b2, a2))
        || (d3 == 0 && on_segment(a1, a2, b1))
        || (d4 == 0 && on_segment(a1, a2, b2))
}

/// Sign of the cross product of `b - a` and `c - a`.
fn orientation(a: Point, b: Point, c: Point) -> i8 {
    let val = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if val == 0.0 {
        0
    } else if val > 0.0 {
        1
    } else {
        -1
    }
}

/// Whether `c`, known collinear with `a..b`, lies within the segment's bounds.
fn on_segment(a: Point, b: Point, c: Point) -> bool {
    a.x.min(b.x) <= c.x && c.x <= a.x.max(b.x) && a.y.min(b.y) <= c.y && c.y <= a.y.max(b.y)
}

/// Whether any ring of `geometry` intersects `rect`.
///
/// True when any ring edge crosses a rectangle edge, when some ring lies
/// entirely inside the rectangle, or when all four rectangle corners lie
/// inside the polygon. The last test reuses the even-odd point membership
/// rather than exact containment; for the small query rectangles used in
/// picking the approximation is indistinguishable from the precise answer.
pub fn polygon_intersects_rect(geometry: &Geometry, rect: Rect) -> bool {
    let rect_edges = edges(rect);
    for ring in &geometry.rings {
        if ring.len() < 2 {
            continue;
        }
        for i in 0..ring.len() {
            let p1 = ring[i];
            let p2 = ring[(i + 1) % ring.len()];
            if rect_edges
                .iter()
                .any(|e| segments_intersect(p1, p2, e.p0, e.p1))
            {
                return true;
            }
        }
    }

    // No edge crossing: either one shape is inside the other, or they are
    // disjoint.
    let some_ring_inside = geometry
        .rings
        .iter()
        .any(|ring| !ring.is_empty() && ring.iter().all(|p| contains_point(rect, *p)));
    if some_ring_inside {
        return true;
    }
    corners(rect)
        .iter()
        .all(|c| point_in_polygon(*c, geometry))
}

/// Even-odd point-in-polygon test over every ring of `geometry`.
///
/// Casts a horizontal ray to the left of `point` and counts segment
/// crossings across all rings combined, so holes subtract from the interior.
/// Rings are treated as closed.
pub fn point_in_polygon(point: Point, geometry: &Geometry) -> bool {
    let mut crossings = 0_u32;
    for ring in &geometry.rings {
        if ring.len() < 2 {
            continue;
        }
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[(i + 1) % ring.len()];
            if ray_intersects_segment(point, a, b) {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}

/// Whether the leftward horizontal ray from `point` crosses segment `a..b`.
fn ray_intersects_segment(point: Point, a: Point, b: Point) -> bool {
    let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };

    // A ray passing exactly through an endpoint would be counted by both
    // adjacent segments; sampling slightly off the tie breaks the ambiguity.
    let mut y = point.y;
    if y == lo.y || y == hi.y {
        y += RAY_NUDGE;
    }

    if y < lo.y || y > hi.y {
        return false;
    }
    if point.x >= lo.x.max(hi.x) {
        return false;
    }
    if point.x < lo.x.min(hi.x) {
        return true;
    }

    // Horizontal segments never reach here: the nudge pushed y outside their
    // (zero-height) span, so the division below is safe.
    let intersection_x = lo.x + (y - lo.y) * (hi.x - lo.x) / (hi.y - lo.y);
    point.x <= intersection_x
}

/// Whether every point of every ring lies inside `rect` (edges included).
///
/// This is the exact-query predicate: no closure assumption, raw point
/// membership only. Vacuously true for empty geometry.
pub fn fully_contained(geometry: &Geometry, rect: Rect) -> bool {
    geometry
        .rings
        .iter()
        .all(|ring| ring.iter().all(|p| contains_point(rect, *p)))
}
