// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Terrane Simplify: ring reduction and level-of-detail selection.
//!
//! Map rendering draws the same object at many zoom levels; drawing the full
//! vertex set when the object covers a handful of pixels is wasted work. This
//! crate provides the two reduction passes used to precompute per-zoom
//! geometry variants, plus the [`LodTable`] that maps a zoom scalar to a
//! variant bucket:
//!
//! - [`simplify`]: classic Douglas-Peucker, driven by a perpendicular
//!   distance tolerance `epsilon`.
//! - [`simplify_by_proportion`]: a cheaper adjacent-triple filter that drops
//!   a middle point when its offset from the surrounding chord is small in
//!   proportion to the chord; this is the pass the LOD table parameterizes.
//!
//! Both passes preserve point order and never grow the input.
//! [`simplify`] is idempotent at a fixed tolerance; the proportion filter is
//! not, in general, because dropping a point re-forms triples it does not
//! revisit, but outputs whose every consecutive triple clears the threshold
//! are stable under further passes.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use terrane_simplify::simplify;
//!
//! let ring = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.01),
//!     Point::new(2.0, 0.0),
//! ];
//! // The middle point deviates by 0.01, well under the tolerance.
//! assert_eq!(simplify(&ring, 0.1).len(), 2);
//! // A tight tolerance keeps it.
//! assert_eq!(simplify(&ring, 0.001).len(), 3);
//! ```

#![no_std]

extern crate alloc;

mod lod;
mod reduce;

pub use lod::{LodLevel, LodTable, LodTableError};
pub use reduce::{simplify, simplify_by_proportion};
