// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Terrane Tree: a containment-driven bounding-box forest for map objects.
//!
//! This crate indexes map objects by the axis-aligned bounding boxes of their
//! geometry and answers the two queries an interactive map needs:
//!
//! - [`Forest::query_contained`]: which objects lie entirely inside a
//!   rectangle (marquee selection).
//! - [`Forest::query_area`]: which objects a small cursor rectangle picks
//!   (exact containment first, then a center-point fallback).
//!
//! Unlike a classic R-tree there is no fixed branching factor and no
//! balancing: the hierarchy is emergent, driven by which boxes engulf which
//! at insertion time. Larger-area boxes float toward the roots, and the
//! top-level root boxes are kept pairwise disjoint by merging intersecting
//! pairs after every mutation. Degenerate inputs can degrade the structure
//! (many sibling leaves under one root); queries stay correct, only pruning
//! suffers.
//!
//! ## API overview
//!
//! - [`Forest`]: the container. Generic over an opaque handle type `H`
//!   compared only for equality.
//! - [`NodeId`]: generational identifier of a node, for structure
//!   inspection and debug overlays.
//! - [`InsertError`]: why an insertion was refused.
//!
//! Key operations:
//! - [`Forest::insert`] and [`Forest::remove`].
//! - [`Forest::query_contained`] and [`Forest::query_area`].
//! - [`Forest::bounding_boxes`] for debug rendering.
//!
//! Geometry and predicates come from [`terrane_geom`]; level-of-detail
//! variants to index typically come from `terrane_simplify`.

#![no_std]

extern crate alloc;

mod forest;
mod types;

pub use forest::Forest;
pub use types::{InsertError, NodeId};
