// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom-to-simplification mapping.
//!
//! A [`LodTable`] is an explicit configuration value owned by the caller
//! (typically one per map view), never process-wide state. The renderer asks
//! [`LodTable::resolve`] which precomputed geometry variant to draw and feed
//! to the spatial index at the current zoom.

use alloc::vec::Vec;
use kurbo::Point;
use terrane_geom::Geometry;
use thiserror::Error;

use crate::reduce::simplify_by_proportion;

/// An ordered zoom-to-parameter table: `(zoom_threshold, prop)` pairs,
/// ascending by threshold.
///
/// Each entry is one level-of-detail bucket; the `prop` parameter feeds
/// [`simplify_by_proportion`] when variants are precomputed. Lower zoom
/// (zoomed further out) resolves to earlier, more aggressive buckets when
/// thresholds are laid out that way; zooms beyond every threshold fall back
/// to the last bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct LodTable {
    entries: Vec<(f64, f64)>,
}

/// A resolved level-of-detail bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodLevel {
    /// Index of the geometry variant to use.
    pub bucket: usize,
    /// The simplification proportion that produced the variant.
    pub prop: f64,
}

/// Rejected level-of-detail table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum LodTableError {
    /// The table has no entries.
    #[error("level-of-detail table must have at least one entry")]
    Empty,
    /// A threshold or parameter is NaN or infinite.
    #[error("level-of-detail table contains a non-finite value")]
    NonFinite,
    /// Thresholds must strictly ascend.
    #[error("level-of-detail thresholds must be strictly ascending")]
    NotAscending,
}

impl LodTable {
    /// Build a table from `(zoom_threshold, prop)` pairs.
    ///
    /// # Errors
    ///
    /// Rejects empty tables, non-finite values, and thresholds that are not
    /// strictly ascending.
    pub fn new(entries: Vec<(f64, f64)>) -> Result<Self, LodTableError> {
        if entries.is_empty() {
            return Err(LodTableError::Empty);
        }
        if entries
            .iter()
            .any(|(zoom, prop)| !zoom.is_finite() || !prop.is_finite())
        {
            return Err(LodTableError::NonFinite);
        }
        if entries.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(LodTableError::NotAscending);
        }
        Ok(Self { entries })
    }

    /// Number of level-of-detail buckets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The simplification parameter of a bucket, if it exists.
    pub fn prop(&self, bucket: usize) -> Option<f64> {
        self.entries.get(bucket).map(|(_, prop)| *prop)
    }

    /// Resolve a zoom scalar to a bucket: the first entry whose threshold is
    /// at least `zoom`, or the last (most-simplified fallback) bucket when
    /// the zoom exceeds every threshold.
    pub fn resolve(&self, zoom: f64) -> LodLevel {
        let bucket = self
            .entries
            .iter()
            .position(|(threshold, _)| *threshold >= zoom)
            .unwrap_or(self.entries.len() - 1);
        LodLevel {
            bucket,
            prop: self.entries[bucket].1,
        }
    }

    /// Precompute one simplified variant of `geometry` per bucket, in bucket
    /// order. Rings are reduced independently with each bucket's `prop`.
    pub fn variants(&self, geometry: &Geometry) -> Vec<Geometry> {
        self.entries
            .iter()
            .map(|(_, prop)| {
                let rings: Vec<Vec<Point>> = geometry
                    .rings
                    .iter()
                    .map(|ring| simplify_by_proportion(ring, *prop))
                    .collect();
                Geometry::new(rings)
            })
            .collect()
    }
}
