// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`MappingTree`](crate::MappingTree) operations.

use thiserror::Error;

use crate::types::Aabb2D;

/// Precondition failures of the mapping tree API.
///
/// Every variant is recoverable: the tree is left untouched when one is returned.
/// A query that simply finds nothing is not an error; it yields `Ok(None)`.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum MappingTreeError {
    /// The region extents are inverted or contain a non-finite coordinate.
    #[error("invalid extents {0:?}: coordinates must be finite and min <= max on both axes")]
    InvalidExtents(Aabb2D),
    /// A query point lies outside the region extents.
    #[error("point ({x}, {y}) lies outside the tree extents")]
    PointOutOfExtents {
        /// Query x coordinate.
        x: f64,
        /// Query y coordinate.
        y: f64,
    },
    /// The bounds of an inserted item are not contained in the region extents.
    #[error("item bounds {0:?} are not inside the tree extents")]
    BoundsOutOfExtents(Aabb2D),
    /// The item is already present in the tree.
    #[error("item is already present in the tree")]
    DuplicateItem,
    /// The item is not present in the tree.
    #[error("item is not present in the tree")]
    UnknownItem,
}
