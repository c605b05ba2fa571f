// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plain-data geometry model: rings of world-space points.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

/// One boundary: an ordered point sequence.
///
/// A ring is implicitly closed (last point connects back to the first) when
/// used as a polygon boundary and open when used as a line. The predicates
/// that need closure wrap the index modulo the ring length; nothing is
/// duplicated in the data.
pub type Ring = Vec<Point>;

/// The geometry of one map object: an ordered list of rings.
///
/// A point or a line is a single ring; a polygon with holes or a multi-part
/// feature carries several. The containment tree never looks past this
/// structure; kind-specific behavior (fill vs stroke) belongs to the caller,
/// which can carry an [`ObjectKind`] alongside.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// The rings making up this object, outer boundary first by convention.
    pub rings: Vec<Ring>,
}

impl Geometry {
    /// Create a geometry from a list of rings.
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// Create a single-ring geometry.
    pub fn single(ring: Ring) -> Self {
        Self { rings: vec![ring] }
    }

    /// Whether the geometry has no points at all (no rings, or only empty rings).
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(Ring::is_empty)
    }

    /// Total number of points across all rings.
    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }

    /// Whether every coordinate is finite (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.rings
            .iter()
            .all(|ring| ring.iter().all(|p| p.is_finite()))
    }

    /// The axis-aligned bounding box of all points, or `None` for an empty
    /// geometry.
    ///
    /// Recomputed on every call; the box is never cached, so it cannot go
    /// stale if a caller mutates `rings` in place.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut points = self.rings.iter().flatten();
        let first = points.next()?;
        let mut bounds = Rect::new(first.x, first.y, first.x, first.y);
        for p in points {
            bounds.x0 = bounds.x0.min(p.x);
            bounds.y0 = bounds.y0.min(p.y);
            bounds.x1 = bounds.x1.max(p.x);
            bounds.y1 = bounds.y1.max(p.y);
        }
        Some(bounds)
    }
}

/// Coarse classification of a map object, carried by callers for drawing
/// decisions (fill vs stroke). The spatial index itself is kind-agnostic.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    /// A single location.
    Point,
    /// An open polyline.
    Line,
    /// A closed areal boundary.
    Polygon,
    /// A multi-ring feature (polygon with holes, multi-line, multi-polygon).
    Multi,
}
