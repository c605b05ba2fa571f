// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Terrane Geom: geometry types and pure predicates for map object picking.
//!
//! This crate holds the plain-data geometry model shared by the rest of the
//! workspace (world-space rings grouped into a [`Geometry`] per map object),
//! together with the segment/polygon/rectangle predicates used by the
//! containment tree in `terrane_tree`.
//!
//! Everything here is a pure function over [`kurbo`] primitives. Coordinates
//! are flat Cartesian; there is no projection or geodesic handling.
//!
//! # Rectangle semantics
//!
//! The rectangle helpers in [`rect`] treat edges as part of the rectangle:
//! a point exactly on an edge is contained, and two rectangles sharing an
//! edge overlap. [`kurbo::Rect::contains`] is half-open, so the tree and the
//! predicates use these helpers instead.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use terrane_geom::{Geometry, fully_contained, point_in_polygon};
//!
//! let square = Geometry::single(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]);
//!
//! assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
//! assert!(fully_contained(&square, Rect::new(-1.0, -1.0, 11.0, 11.0)));
//! ```

#![no_std]

extern crate alloc;

mod geometry;
mod predicates;
pub mod rect;

pub use geometry::{Geometry, ObjectKind, Ring};
pub use predicates::{
    fully_contained, point_in_polygon, polygon_intersects_rect, segments_intersect,
};
