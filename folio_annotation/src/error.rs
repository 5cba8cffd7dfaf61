// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by annotation setters.

use folio_mapping::MappingTreeError;
use kurbo::Point;
use thiserror::Error;

/// Rejected annotation updates. The annotation is left unchanged when one is returned.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum AnnotationError {
    /// The hit index could not be built from the ink geometry.
    #[error(transparent)]
    Mapping(#[from] MappingTreeError),
    /// Per-path widths were given for a different number of paths.
    #[error("{widths} stroke widths given for {paths} paths")]
    WidthCountMismatch {
        /// Number of widths supplied.
        widths: usize,
        /// Number of paths.
        paths: usize,
    },
    /// A stroke width is negative or not finite.
    #[error("stroke width {0} is negative or not finite")]
    InvalidWidth(f64),
    /// An ink point has a NaN or infinite coordinate.
    #[error("ink point {0:?} is not finite")]
    InvalidPoint(Point),
    /// Opacity outside `0.0..=1.0`.
    #[error("opacity {0} is outside 0..=1")]
    InvalidOpacity(f64),
}
