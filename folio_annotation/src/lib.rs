// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=folio_annotation --heading-base-level=0

//! Folio Annotation: Kurbo-native page annotations with fast stroke hit testing.
//!
//! This crate models the annotations a document viewer attaches to a page and
//! answers "is the pointer on this annotation?" without scanning every stroke.
//!
//! - [`AnnotationProps`]: page, name, contents and modification date shared by all annotations.
//! - [`MarkupProps`]: label, opacity and popup state of markup annotations.
//! - [`Observers`]: callbacks notified with a [`Changed`] set after every effective change.
//! - [`InkAnnotation`]: freehand polylines with a [`StrokeWidth`] and an [`InkOperator`].
//!
//! Setters return `true` only when the stored value changed, and only then notify
//! observers. Invalid values are rejected with an [`AnnotationError`] and leave the
//! annotation untouched.
//!
//! ## Hit testing
//!
//! Each time the paths or widths of an [`InkAnnotation`] change, a
//! [`folio_mapping::MappingTree`] is rebuilt with one item per straight segment.
//! A segment's box is its bounding box grown by half the stroke width, and its
//! predicate is [`segment_hit`]. The index is reference counted and can be shared
//! with another thread through [`InkAnnotation::hit_index`].
//!
//! ## Example
//!
//! ```
//! use folio_annotation::{InkAnnotation, SegmentId};
//! use kurbo::Point;
//!
//! let mut ink = InkAnnotation::new(0);
//! ink.set_width(2.0).unwrap();
//! ink.set_paths(vec![vec![
//!     Point::new(10.0, 10.0),
//!     Point::new(60.0, 10.0),
//!     Point::new(60.0, 40.0),
//! ]])
//! .unwrap();
//!
//! assert!(ink.is_hit(Point::new(35.0, 10.5)));
//! assert_eq!(ink.hit_segment(Point::new(60.5, 25.0)), Some(SegmentId::new(0, 1)));
//! assert!(!ink.is_hit(Point::new(35.0, 25.0)));
//! ```

#![no_std]

extern crate alloc;

mod annotation;
mod error;
mod ink;
mod segment;
mod types;
mod util;

pub use annotation::{AnnotationProps, MarkupProps, ObserverFn, ObserverId, Observers};
pub use error::AnnotationError;
pub use ink::{InkAnnotation, InkIndex};
pub use segment::segment_hit;
pub use types::{Changed, InkOperator, SegmentId, StrokeWidth};
