// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=folio_mapping --heading-base-level=0

//! Folio Mapping: a loose quadtree for point hit-testing on a bounded page.
//!
//! A [`MappingTree`] answers "which item is under this point?" for the items of one
//! document page: ink strokes, markup, links, glyph runs. Each item is inserted
//! with its bounding box and a [`HitTest`] predicate; the tree narrows a query down
//! to a handful of cells and lets the predicate decide.
//!
//! - Every item lives in exactly one cell, picked from its bounding box alone.
//! - Cells are *loose*: they accept anything that fits once grown by
//!   [`EXPANSION`] half-cells, so an item is never split across cells.
//! - A point query probes at most four cells per occupied depth, finest depth
//!   first, newest entry first within a cell.
//! - Items carry an identity (`Eq + Hash`) so they can be removed without
//!   knowing where they were stored.
//!
//! The crate is `no_std` (it needs `alloc`) and has no geometry dependency: world
//! coordinates are plain `f64` and boxes are [`Aabb2D`].
//!
//! # Example
//!
//! ```rust
//! use folio_mapping::{Aabb2D, MappingTree};
//!
//! // One tree per page, covering the page's extents.
//! let mut tree = MappingTree::new(3, Aabb2D::new(0.0, 0.0, 612.0, 792.0)).unwrap();
//!
//! // A link rectangle hits every point inside it.
//! let link = Aabb2D::new(72.0, 700.0, 200.0, 712.0);
//! tree.add("link", link, link).unwrap();
//!
//! // A round stamp only hits inside its circle.
//! tree.add("stamp", Aabb2D::new(300.0, 300.0, 340.0, 340.0), |_: &&str, x: f64, y: f64| {
//!     let (dx, dy) = (x - 320.0, y - 320.0);
//!     dx * dx + dy * dy <= 400.0
//! })
//! .unwrap();
//!
//! assert_eq!(tree.get(136.0, 706.0).unwrap(), Some(&"link"));
//! assert_eq!(tree.get(320.0, 320.0).unwrap(), Some(&"stamp"));
//! // Inside the stamp's box, outside its circle.
//! assert_eq!(tree.get(301.0, 301.0).unwrap(), None);
//!
//! tree.remove(&"link").unwrap();
//! assert_eq!(tree.get(136.0, 706.0).unwrap(), None);
//! ```
//!
//! ## Query semantics
//!
//! A query finds every item whose bounds contain the point and whose predicate
//! accepts it, but returns only one. When several items match, the one returned
//! is the newest of its cell among the first cell that yields a match.
//!
//! ## Errors
//!
//! Precondition failures (points or bounds outside the extents, duplicate or
//! unknown items, malformed extents) are reported as [`MappingTreeError`] and leave
//! the tree untouched. Placement that fails to converge is an internal defect and
//! panics.

#![no_std]

extern crate alloc;

mod error;
pub mod grid;
mod hit;
mod key;
mod tree;
mod types;

pub use error::MappingTreeError;
pub use grid::{EXPANSION, GRID_UNITS, MAX_DEPTH};
pub use hit::HitTest;
pub use key::CellKey;
pub use tree::{ItemDestructor, MappingTree};
pub use types::Aabb2D;
