// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level-of-detail indexing plus cursor picking over a tiny synthetic map.
//!
//! This example shows the intended pipeline:
//! - `terrane_simplify` precomputes per-zoom geometry variants of each layer,
//! - `terrane_tree` indexes the variant for the current zoom,
//! - `Forest::query_area` answers what a cursor rectangle picks.
//!
//! Run:
//! - `cargo run -p terrane_demos --example map_pick`

use kurbo::{Point, Rect};
use terrane_geom::{Geometry, ObjectKind};
use terrane_simplify::LodTable;
use terrane_tree::Forest;

/// A map layer: a stable id plus full-detail geometry. The kind drives
/// drawing decisions (fill vs stroke); the index never looks at it.
struct Layer {
    id: u32,
    name: &'static str,
    kind: ObjectKind,
    geometry: Geometry,
}

fn jagged_square(x0: f64, y0: f64, size: f64, teeth: usize) -> Geometry {
    // A square whose top edge carries small zigzag teeth, so simplification
    // has something to remove.
    let mut ring = vec![Point::new(x0, y0)];
    let step = size / (teeth as f64 * 2.0);
    for i in 0..teeth * 2 {
        let x = x0 + step * (i + 1) as f64;
        let y = if i % 2 == 0 { y0 + size * 0.02 } else { y0 };
        ring.push(Point::new(x, y));
    }
    ring.push(Point::new(x0 + size, y0 + size));
    ring.push(Point::new(x0, y0 + size));
    Geometry::single(ring)
}

fn main() {
    let layers = [
        Layer {
            id: 1,
            name: "province",
            kind: ObjectKind::Polygon,
            geometry: jagged_square(0.0, 0.0, 100.0, 12),
        },
        Layer {
            id: 2,
            name: "city",
            kind: ObjectKind::Polygon,
            geometry: jagged_square(30.0, 30.0, 20.0, 6),
        },
        Layer {
            id: 3,
            name: "park",
            kind: ObjectKind::Polygon,
            geometry: jagged_square(34.0, 34.0, 4.0, 3),
        },
    ];

    // Three zoom buckets: far out (aggressive), mid, close in (full detail).
    let table = LodTable::new(vec![(0.25, 0.4), (0.5, 0.1), (1.0, 0.0)]).expect("valid table");

    // Precompute simplified variants once per layer.
    let variants: Vec<Vec<Geometry>> = layers
        .iter()
        .map(|layer| table.variants(&layer.geometry))
        .collect();

    for (layer, vs) in layers.iter().zip(&variants) {
        let counts: Vec<usize> = vs.iter().map(Geometry::point_count).collect();
        println!(
            "{:<9} {:?}: full detail {:>3} points, per-bucket {:?}",
            layer.name,
            layer.kind,
            layer.geometry.point_count(),
            counts
        );
    }

    // Rebuild the index for the current zoom from the matching variants.
    let zoom = 0.6;
    let level = table.resolve(zoom);
    println!("\nzoom {zoom} resolves to bucket {} (prop {})", level.bucket, level.prop);

    let mut forest: Forest<u32> = Forest::new();
    for (layer, vs) in layers.iter().zip(&variants) {
        forest
            .insert(layer.id, vs[level.bucket].clone())
            .expect("layer geometry is non-empty and finite");
    }
    println!(
        "indexed {} objects under {} top-level root(s)",
        forest.len(),
        forest.roots().len()
    );

    // A cursor pick: a few world units around the pointer.
    let cursor = Point::new(36.0, 36.0);
    let pick = Rect::new(cursor.x - 0.5, cursor.y - 0.5, cursor.x + 0.5, cursor.y + 0.5);
    let picked = forest.query_area(pick);
    report("cursor pick", &layers, &picked);

    // A marquee selection around the city. The park nests inside the city's
    // box, and containment queries stop at the outermost contained object.
    let marquee = Rect::new(28.0, 28.0, 52.0, 52.0);
    let selected = forest.query_contained(marquee);
    report("marquee selection", &layers, &selected);

    // Debug overlay data: one box per node.
    println!("\n{} node boxes for the debug overlay", forest.bounding_boxes().len());
}

fn report(what: &str, layers: &[Layer], hits: &[u32]) {
    let names: Vec<&str> = layers
        .iter()
        .filter(|l| hits.contains(&l.id))
        .map(|l| l.name)
        .collect();
    println!("{what}: {names:?}");
}
