// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the forest: node identifiers and errors.

use thiserror::Error;

/// Identifier for a node in the forest (generational).
///
/// A `NodeId` is a slot index plus a generation counter; removing a node and
/// reusing its slot bumps the generation, so stale identifiers never alias a
/// newer node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Rejected insertion.
///
/// Malformed geometry is refused up front so the bounding-box math never
/// sees a NaN or a degenerate (min > max) box.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum InsertError {
    /// The geometry has no points, so no bounding box exists for it.
    #[error("cannot index empty geometry (no rings, or rings with no points)")]
    EmptyGeometry,
    /// A coordinate is NaN or infinite.
    #[error("cannot index geometry with non-finite coordinates")]
    NonFinite,
}
