// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test predicates attached to tree entries.

use crate::types::Aabb2D;

/// Decides whether a query point really falls on an item.
///
/// The tree only narrows candidates down to items whose loose cell covers the
/// point; the predicate has the final say. It receives the raw world-space query
/// point, not grid coordinates.
///
/// Closures of the form `Fn(&I, f64, f64) -> bool` implement this trait, so any
/// caller context can simply be captured:
///
/// ```
/// use folio_mapping::{Aabb2D, MappingTree};
///
/// let mut tree = MappingTree::new(0, Aabb2D::new(0.0, 0.0, 100.0, 100.0)).unwrap();
/// let radius = 5.0;
/// let _ = tree
///     .add(1_u32, Aabb2D::new(45.0, 45.0, 55.0, 55.0), move |_: &u32, x: f64, y: f64| {
///         let (dx, dy) = (x - 50.0, y - 50.0);
///         dx * dx + dy * dy <= radius * radius
///     })
///     .unwrap();
/// assert_eq!(tree.get(52.0, 51.0).unwrap(), Some(&1));
/// assert_eq!(tree.get(54.5, 54.5).unwrap(), None);
/// ```
pub trait HitTest<I> {
    /// Return true if `(x, y)` lies on `item`.
    fn hit_test(&self, item: &I, x: f64, y: f64) -> bool;
}

impl<I, F> HitTest<I> for F
where
    F: Fn(&I, f64, f64) -> bool,
{
    #[inline]
    fn hit_test(&self, item: &I, x: f64, y: f64) -> bool {
        self(item, x, y)
    }
}

/// Rectangular items: a box hits every point it contains.
impl<I> HitTest<I> for Aabb2D {
    #[inline]
    fn hit_test(&self, _item: &I, x: f64, y: f64) -> bool {
        self.contains_point(x, y)
    }
}
