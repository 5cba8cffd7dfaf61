// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page mapping.
//!
//! Map the links and images of a page into a loose quadtree and resolve clicks.
//! Removed items are released through the tree's destructor.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p folio_demos --example page_mapping`

use folio_mapping::{Aabb2D, MappingTree, MappingTreeError};
use tracing::{Level, info};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum PageItem {
    Link(&'static str),
    Image(u32),
}

fn main() -> Result<(), MappingTreeError> {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).init();

    let page = Aabb2D::new(0.0, 0.0, 612.0, 792.0);
    let mut tree = MappingTree::with_destructor(5, page, |item: PageItem| {
        info!(?item, "released");
    })?;

    let items = [
        (PageItem::Image(1), Aabb2D::new(72.0, 72.0, 540.0, 360.0)),
        (PageItem::Link("https://example.org"), Aabb2D::new(72.0, 380.0, 220.0, 394.0)),
        (PageItem::Link("#chapter-2"), Aabb2D::new(300.0, 700.0, 360.0, 712.0)),
    ];
    for (item, bounds) in items {
        let key = tree.add(item.clone(), bounds, bounds)?;
        println!("{item:?} -> {key:?}");
    }

    for (x, y) in [(300.0, 200.0), (146.0, 387.0), (330.0, 706.0), (10.0, 10.0)] {
        println!("click ({x}, {y}) -> {:?}", tree.get(x, y)?);
    }

    match tree.get(700.0, 10.0) {
        Err(e) => println!("click outside the page: {e}"),
        Ok(hit) => println!("unexpected: {hit:?}"),
    }

    tree.remove(&PageItem::Image(1))?;
    println!("after removing the image: {:?}", tree.get(300.0, 200.0)?);
    println!("{tree:?}");
    Ok(())
}
