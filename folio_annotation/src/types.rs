// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for annotations: segment identifiers, change flags, and ink styling.

use alloc::vec::Vec;

/// Identifier of one straight segment of an ink annotation.
///
/// `path` indexes the annotation's paths and `index` the segment within that path:
/// segment `i` joins points `i` and `i + 1`. Identifiers are only meaningful for
/// the paths they were computed from; replacing the paths rebuilds the index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SegmentId {
    /// Index of the path.
    pub path: usize,
    /// Index of the segment within the path.
    pub index: usize,
}

impl SegmentId {
    /// Create a segment identifier.
    pub const fn new(path: usize, index: usize) -> Self {
        Self { path, index }
    }
}

bitflags::bitflags! {
    /// Properties reported to observers when a setter changes them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Changed: u16 {
        /// [`AnnotationProps::name`](crate::AnnotationProps::name).
        const NAME          = 1 << 0;
        /// [`AnnotationProps::contents`](crate::AnnotationProps::contents).
        const CONTENTS      = 1 << 1;
        /// [`AnnotationProps::modified`](crate::AnnotationProps::modified).
        const MODIFIED      = 1 << 2;
        /// [`MarkupProps::label`](crate::MarkupProps::label).
        const LABEL         = 1 << 3;
        /// [`MarkupProps::opacity`](crate::MarkupProps::opacity).
        const OPACITY       = 1 << 4;
        /// [`MarkupProps::has_popup`](crate::MarkupProps::has_popup).
        const HAS_POPUP     = 1 << 5;
        /// [`MarkupProps::popup_rect`](crate::MarkupProps::popup_rect).
        const POPUP_RECT    = 1 << 6;
        /// [`MarkupProps::popup_is_open`](crate::MarkupProps::popup_is_open).
        const POPUP_IS_OPEN = 1 << 7;
        /// Ink paths.
        const PATHS         = 1 << 8;
        /// Ink stroke width(s).
        const WIDTH         = 1 << 9;
        /// Ink compositing operator.
        const OPERATOR      = 1 << 10;
    }
}

/// How an ink stroke is composited onto the page.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum InkOperator {
    /// Paint over the page content.
    #[default]
    Over,
    /// Multiply with the page content (highlighter style).
    Multiply,
}

/// Stroke width of an ink annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum StrokeWidth {
    /// One width shared by every path.
    Uniform(f64),
    /// One width per path, in path order.
    PerPath(Vec<f64>),
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl StrokeWidth {
    /// Width of the given path. Paths without a width of their own get `0`.
    pub fn of_path(&self, path: usize) -> f64 {
        match self {
            Self::Uniform(w) => *w,
            Self::PerPath(ws) => ws.get(path).copied().unwrap_or(0.0),
        }
    }

    /// Largest width in use.
    pub fn max(&self) -> f64 {
        match self {
            Self::Uniform(w) => *w,
            Self::PerPath(ws) => ws.iter().copied().fold(0.0, f64::max),
        }
    }

    /// The first width that is negative or not finite, if any.
    pub(crate) fn first_invalid(&self) -> Option<f64> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        match self {
            Self::Uniform(w) => (!valid(*w)).then_some(*w),
            Self::PerPath(ws) => ws.iter().copied().find(|&w| !valid(w)),
        }
    }
}
