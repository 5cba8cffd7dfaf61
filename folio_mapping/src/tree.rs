// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The loose quadtree: insertion, point queries, removal and enumeration.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::error::MappingTreeError;
use crate::grid::{self, DepthMask, Normalizer};
use crate::hit::HitTest;
use crate::key::CellKey;
use crate::types::Aabb2D;

type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;

/// Callback run on every item that leaves the tree through [`MappingTree::remove`],
/// [`MappingTree::clear`] or drop.
pub type ItemDestructor<I> = Box<dyn FnMut(I) + Send + Sync>;

struct Entry<I> {
    item: I,
    hit: Box<dyn HitTest<I> + Send + Sync>,
    key: CellKey,
    seq: u64,
}

/// A loose quadtree over one bounded region (typically one document page).
///
/// Items are opaque values with an identity (`Eq + Hash`), stored together with a
/// hit-test predicate. See the [crate docs](crate) for the placement rules.
///
/// To share a tree, wrap it in an [`Arc`](alloc::sync::Arc): queries work through
/// shared references, mutation needs unique access (for example
/// [`Arc::get_mut`](alloc::sync::Arc::get_mut)). Surviving items are handed to the
/// destructor exactly once, when the last handle is dropped.
pub struct MappingTree<I> {
    page: u32,
    extents: Aabb2D,
    grid: Normalizer,
    slots: Vec<Option<Entry<I>>>,
    free_list: Vec<usize>,
    cells: FxHashMap<CellKey, Vec<usize>>,
    order: BTreeMap<u64, usize>,
    reverse: FxHashMap<I, usize>,
    depth_mask: DepthMask,
    next_seq: u64,
    destroy: Option<ItemDestructor<I>>,
}

impl<I> Debug for MappingTree<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MappingTree")
            .field("page", &self.page)
            .field("extents", &self.extents)
            .field("items", &self.order.len())
            .field("cells", &self.cells.len())
            .field("depth_mask", &self.depth_mask)
            .field("has_destructor", &self.destroy.is_some())
            .finish_non_exhaustive()
    }
}

impl<I> MappingTree<I>
where
    I: Clone + Eq + Hash,
{
    /// Create an empty tree covering `extents`.
    ///
    /// Items removed from the tree are simply dropped.
    ///
    /// # Errors
    ///
    /// [`MappingTreeError::InvalidExtents`] if `extents` is inverted or not finite.
    /// Zero-width or zero-height extents are accepted.
    pub fn new(page: u32, extents: Aabb2D) -> Result<Self, MappingTreeError> {
        if !extents.is_well_formed() {
            return Err(MappingTreeError::InvalidExtents(extents));
        }
        Ok(Self {
            page,
            extents,
            grid: Normalizer::new(&extents),
            slots: Vec::new(),
            free_list: Vec::new(),
            cells: FxHashMap::default(),
            order: BTreeMap::new(),
            reverse: FxHashMap::default(),
            depth_mask: DepthMask::default(),
            next_seq: 0,
            destroy: None,
        })
    }

    /// Create an empty tree whose items are passed to `destroy` when they leave it.
    ///
    /// # Errors
    ///
    /// Same as [`MappingTree::new`].
    pub fn with_destructor<F>(page: u32, extents: Aabb2D, destroy: F) -> Result<Self, MappingTreeError>
    where
        F: FnMut(I) + Send + Sync + 'static,
    {
        let mut tree = Self::new(page, extents)?;
        tree.destroy = Some(Box::new(destroy));
        Ok(tree)
    }

    /// Page tag given at construction.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Region covered by the tree.
    pub fn extents(&self) -> Aabb2D {
        self.extents
    }

    /// Number of items in the tree.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `item` is currently in the tree.
    pub fn contains(&self, item: &I) -> bool {
        self.reverse.contains_key(item)
    }

    /// Cell that `item` was placed in, if present.
    pub fn cell_of(&self, item: &I) -> Option<CellKey> {
        let slot = *self.reverse.get(item)?;
        self.entry(slot).map(|e| e.key)
    }

    /// Insert `item` with bounding box `bounds` and its hit-test predicate.
    ///
    /// Returns the cell the item was placed in. Within a cell, later insertions are
    /// tested first by [`MappingTree::get`].
    ///
    /// # Errors
    ///
    /// - [`MappingTreeError::BoundsOutOfExtents`] if a corner of `bounds` is outside
    ///   the extents or not finite.
    /// - [`MappingTreeError::DuplicateItem`] if `item` is already present.
    ///
    /// # Panics
    ///
    /// If no cell depth accepts the bounds within three attempts. This cannot
    /// happen for bounds inside the extents and indicates a defect in the
    /// placement rules rather than bad input.
    pub fn add<H>(&mut self, item: I, bounds: Aabb2D, hit: H) -> Result<CellKey, MappingTreeError>
    where
        H: HitTest<I> + Send + Sync + 'static,
    {
        if !self.extents.contains_aabb(&bounds) {
            return Err(MappingTreeError::BoundsOutOfExtents(bounds));
        }
        if self.reverse.contains_key(&item) {
            return Err(MappingTreeError::DuplicateItem);
        }
        let bounds = Aabb2D::from_corners(bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y);
        let min = self.grid.normalize(bounds.min_x, bounds.min_y);
        let max = self.grid.normalize(bounds.max_x, bounds.max_y);
        let Some(key) = grid::place(min, max) else {
            panic!("loose quadtree placement did not converge for {bounds:?} in {:?}", self.extents);
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = Entry {
            item: item.clone(),
            hit: Box::new(hit),
            key,
            seq,
        };
        let slot = if let Some(slot) = self.free_list.pop() {
            self.slots[slot] = Some(entry);
            slot
        } else {
            self.slots.push(Some(entry));
            self.slots.len() - 1
        };
        self.cells.entry(key).or_default().push(slot);
        let _ = self.order.insert(seq, slot);
        let _ = self.reverse.insert(item, slot);
        self.depth_mask.set(usize::from(key.depth()));
        debug!(page = self.page, ?key, items = self.order.len(), "mapping tree add");
        Ok(key)
    }

    /// Find an item whose predicate accepts the point `(x, y)`.
    ///
    /// Occupied depths are visited finest first; at each depth the home cell and
    /// the neighbors within the slack margin are scanned, most recently inserted
    /// entries first. The first predicate returning true wins. When several items
    /// match, which one is returned is only defined within a single cell.
    ///
    /// # Errors
    ///
    /// [`MappingTreeError::PointOutOfExtents`] if the point lies outside the
    /// extents (or is NaN). Finding nothing is `Ok(None)`.
    pub fn get(&self, x: f64, y: f64) -> Result<Option<&I>, MappingTreeError> {
        if !self.extents.contains_point(x, y) {
            return Err(MappingTreeError::PointOutOfExtents { x, y });
        }
        let p = self.grid.normalize(x, y);
        for depth in self.depth_mask.iter() {
            for key in grid::probe_cells(p, depth) {
                let Some(slots) = self.cells.get(&key) else {
                    continue;
                };
                for &slot in slots.iter().rev() {
                    if let Some(e) = self.entry(slot)
                        && e.hit.hit_test(&e.item, x, y)
                    {
                        trace!(x, y, ?key, "mapping tree hit");
                        return Ok(Some(&e.item));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Remove `item` and pass it to the tree's destructor.
    ///
    /// The depth occupancy mask is left as is; a stale depth only costs an empty probe.
    ///
    /// # Errors
    ///
    /// [`MappingTreeError::UnknownItem`] if `item` is not in the tree.
    pub fn remove(&mut self, item: &I) -> Result<(), MappingTreeError> {
        let item = self.take(item)?;
        if let Some(destroy) = self.destroy.as_mut() {
            destroy(item);
        }
        Ok(())
    }

    /// Remove `item` and hand it back without running the destructor.
    ///
    /// # Errors
    ///
    /// [`MappingTreeError::UnknownItem`] if `item` is not in the tree.
    pub fn take(&mut self, item: &I) -> Result<I, MappingTreeError> {
        let slot = self
            .reverse
            .remove(item)
            .ok_or(MappingTreeError::UnknownItem)?;
        let entry = self
            .slots
            .get_mut(slot)
            .and_then(Option::take)
            .ok_or(MappingTreeError::UnknownItem)?;
        if let Some(list) = self.cells.get_mut(&entry.key) {
            if let Some(pos) = list.iter().position(|&s| s == slot) {
                let _ = list.remove(pos);
            }
            if list.is_empty() {
                let _ = self.cells.remove(&entry.key);
            }
        }
        let _ = self.order.remove(&entry.seq);
        self.free_list.push(slot);
        debug!(page = self.page, key = ?entry.key, items = self.order.len(), "mapping tree remove");
        Ok(entry.item)
    }

    /// Remove every item, running the destructor on each, newest first.
    pub fn clear(&mut self) {
        let order = core::mem::take(&mut self.order);
        for slot in order.into_values().rev() {
            if let Some(entry) = self.slots.get_mut(slot).and_then(Option::take)
                && let Some(destroy) = self.destroy.as_mut()
            {
                destroy(entry.item);
            }
        }
        self.slots.clear();
        self.free_list.clear();
        self.cells.clear();
        self.reverse.clear();
        self.depth_mask.clear();
    }

    /// The `n`-th item, counting from the most recently inserted one.
    pub fn nth(&self, n: usize) -> Option<&I> {
        let slot = *self.order.values().rev().nth(n)?;
        self.entry(slot).map(|e| &e.item)
    }

    /// Iterate over all items, most recently inserted first.
    pub fn iter(&self) -> impl Iterator<Item = &I> + '_ {
        self.order
            .values()
            .rev()
            .filter_map(move |&slot| self.entry(slot))
            .map(|e| &e.item)
    }

    fn entry(&self, slot: usize) -> Option<&Entry<I>> {
        self.slots.get(slot)?.as_ref()
    }
}

impl<I> Drop for MappingTree<I> {
    fn drop(&mut self) {
        let Some(destroy) = self.destroy.as_mut() else {
            return;
        };
        for entry in self.slots.drain(..).flatten() {
            destroy(entry.item);
        }
    }
}
