// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive-edge rectangle helpers.
//!
//! [`kurbo::Rect::contains`] is half-open, which is the wrong fit for
//! world-space bounding boxes: a map object sitting exactly on the query
//! edge should still be found. Every helper here treats edges as part of
//! the rectangle.

use kurbo::{Line, Point, Rect};

/// Whether `rect` contains `p`, edges included.
#[inline]
pub fn contains_point(rect: Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

/// Whether `outer` contains all of `inner`, edges included.
#[inline]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && inner.x1 <= outer.x1 && outer.y0 <= inner.y0 && inner.y1 <= outer.y1
}

/// Whether `a` and `b` overlap in any way.
///
/// Two rectangles that merely share an edge are considered overlapping,
/// matching the segment predicates, which count touching segments as
/// intersecting.
#[inline]
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// The four boundary segments of a rectangle: top, right, bottom, left.
pub fn edges(rect: Rect) -> [Line; 4] {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [
        Line::new(tl, tr),
        Line::new(tr, br),
        Line::new(br, bl),
        Line::new(bl, tl),
    ]
}

/// The four corner points of a rectangle.
pub fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}
