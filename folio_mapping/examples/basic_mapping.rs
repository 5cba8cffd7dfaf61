// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Folio Mapping: insert items with predicates, query, and remove.

use folio_mapping::{Aabb2D, MappingTree};

fn main() {
    let mut tree = MappingTree::with_destructor(0, Aabb2D::new(0.0, 0.0, 612.0, 792.0), |id: u32| {
        println!("released item {id}");
    })
    .unwrap();

    // Two overlapping rectangles; the newer one is tested first within a cell.
    let header = Aabb2D::new(36.0, 36.0, 576.0, 96.0);
    let logo = Aabb2D::new(40.0, 40.0, 90.0, 90.0);
    let k1 = tree.add(1, header, header).unwrap();
    let k2 = tree.add(2, logo, logo).unwrap();
    println!("header in {k1:?}, logo in {k2:?}");

    for (x, y) in [(65.0, 65.0), (300.0, 66.0), (300.0, 400.0)] {
        println!("hit at ({x}, {y}): {:?}", tree.get(x, y).unwrap());
    }

    tree.remove(&2).unwrap();
    println!("after removing the logo: {:?}", tree.get(65.0, 65.0).unwrap());
    println!("remaining items: {:?}", tree.iter().collect::<Vec<_>>());
}
