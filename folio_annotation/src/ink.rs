// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Freehand ink annotations and their segment hit index.

use alloc::sync::Arc;
use alloc::vec::Vec;
use folio_mapping::MappingTree;
use kurbo::{Line, Point, Shape};
use tracing::debug;

use crate::annotation::{AnnotationProps, MarkupProps, Observers};
use crate::error::AnnotationError;
use crate::segment::SegmentHit;
use crate::types::{Changed, InkOperator, SegmentId, StrokeWidth};
use crate::util::{points_bbox, rect_to_aabb};

/// Shared hit index of an ink annotation.
pub type InkIndex = Arc<MappingTree<SegmentId>>;

/// A freehand drawing made of one or more polylines.
///
/// Every change to the paths or widths rebuilds a [`MappingTree`] holding one
/// item per segment, so that [`InkAnnotation::is_hit`] only tests the few
/// segments near the query point.
#[derive(Debug, Default)]
pub struct InkAnnotation {
    props: AnnotationProps,
    markup: MarkupProps,
    operator: InkOperator,
    width: StrokeWidth,
    paths: Vec<Vec<Point>>,
    index: Option<InkIndex>,
    observers: Observers,
}

impl InkAnnotation {
    /// Create an empty ink annotation on page `page`, stroked 1 unit wide.
    pub fn new(page: u32) -> Self {
        Self {
            props: AnnotationProps::new(page),
            ..Self::default()
        }
    }

    /// Common annotation properties.
    pub fn props(&self) -> &AnnotationProps {
        &self.props
    }

    /// Markup properties.
    pub fn markup(&self) -> &MarkupProps {
        &self.markup
    }

    /// Change observers; see [`Observers::connect`].
    pub fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }

    /// The polylines of the drawing.
    pub fn paths(&self) -> &[Vec<Point>] {
        &self.paths
    }

    /// Stroke width(s).
    pub fn width(&self) -> &StrokeWidth {
        &self.width
    }

    /// Compositing operator.
    pub fn operator(&self) -> InkOperator {
        self.operator
    }

    /// The straight segment identified by `id`.
    pub fn segment(&self, id: SegmentId) -> Option<Line> {
        let path = self.paths.get(id.path)?;
        let p0 = *path.get(id.index)?;
        let p1 = *path.get(id.index + 1)?;
        Some(Line::new(p0, p1))
    }

    /// Set the name. See [`AnnotationProps::set_name`].
    pub fn set_name(&mut self, name: Option<&str>) -> bool {
        let changed = self.props.set_name(name);
        self.notify_if(changed, Changed::NAME)
    }

    /// Set the contents.
    pub fn set_contents(&mut self, contents: Option<&str>) -> bool {
        let changed = self.props.set_contents(contents);
        self.notify_if(changed, Changed::CONTENTS)
    }

    /// Set the modification date.
    pub fn set_modified(&mut self, modified: Option<&str>) -> bool {
        let changed = self.props.set_modified(modified);
        self.notify_if(changed, Changed::MODIFIED)
    }

    /// Set the author label.
    pub fn set_label(&mut self, label: &str) -> bool {
        let changed = self.markup.set_label(label);
        self.notify_if(changed, Changed::LABEL)
    }

    /// Set the opacity.
    ///
    /// # Errors
    ///
    /// [`AnnotationError::InvalidOpacity`] unless `opacity` is within `0.0..=1.0`.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<bool, AnnotationError> {
        let changed = self.markup.set_opacity(opacity)?;
        Ok(self.notify_if(changed, Changed::OPACITY))
    }

    /// Set whether the annotation has a popup.
    pub fn set_has_popup(&mut self, has_popup: bool) -> bool {
        let changed = self.markup.set_has_popup(has_popup);
        self.notify_if(changed, Changed::HAS_POPUP)
    }

    /// Set the popup rectangle.
    pub fn set_popup_rect(&mut self, rect: kurbo::Rect) -> bool {
        let changed = self.markup.set_popup_rect(rect);
        self.notify_if(changed, Changed::POPUP_RECT)
    }

    /// Show or hide the popup.
    pub fn set_popup_is_open(&mut self, open: bool) -> bool {
        let changed = self.markup.set_popup_is_open(open);
        self.notify_if(changed, Changed::POPUP_IS_OPEN)
    }

    /// Set the compositing operator.
    pub fn set_operator(&mut self, operator: InkOperator) -> bool {
        let changed = self.operator != operator;
        self.operator = operator;
        self.notify_if(changed, Changed::OPERATOR)
    }

    /// Replace the paths, keeping the current width(s), and rebuild the hit index.
    ///
    /// # Errors
    ///
    /// - [`AnnotationError::WidthCountMismatch`] if per-path widths are in use and
    ///   their count differs from the number of new paths.
    /// - [`AnnotationError::InvalidPoint`] if a point is not finite.
    pub fn set_paths(&mut self, paths: Vec<Vec<Point>>) -> Result<bool, AnnotationError> {
        let width = self.width.clone();
        self.set_ink(paths, width)
    }

    /// Use a single width for every path and rebuild the hit index.
    ///
    /// # Errors
    ///
    /// [`AnnotationError::InvalidWidth`] if `width` is negative or not finite.
    pub fn set_width(&mut self, width: f64) -> Result<bool, AnnotationError> {
        let paths = self.paths.clone();
        self.set_ink(paths, StrokeWidth::Uniform(width))
    }

    /// Use one width per path and rebuild the hit index.
    ///
    /// # Errors
    ///
    /// - [`AnnotationError::WidthCountMismatch`] if `widths` and the paths differ in length.
    /// - [`AnnotationError::InvalidWidth`] if a width is negative or not finite.
    pub fn set_widths(&mut self, widths: Vec<f64>) -> Result<bool, AnnotationError> {
        let paths = self.paths.clone();
        self.set_ink(paths, StrokeWidth::PerPath(widths))
    }

    /// Replace paths and widths together and rebuild the hit index.
    ///
    /// On error nothing changes and observers are not notified.
    ///
    /// # Errors
    ///
    /// See [`InkAnnotation::set_paths`] and [`InkAnnotation::set_widths`].
    pub fn set_ink(&mut self, paths: Vec<Vec<Point>>, width: StrokeWidth) -> Result<bool, AnnotationError> {
        let mut changed = Changed::empty();
        changed.set(Changed::PATHS, paths != self.paths);
        changed.set(Changed::WIDTH, width != self.width);
        if changed.is_empty() {
            return Ok(false);
        }
        let index = build_index(self.props.page(), &paths, &width)?;
        self.paths = paths;
        self.width = width;
        self.index = index;
        Ok(self.notify_if(true, changed))
    }

    /// Whether `p` lies on one of the strokes.
    ///
    /// Points outside the drawing's extents, or any point when there are no
    /// segments, are never hits.
    pub fn is_hit(&self, p: Point) -> bool {
        self.hit_segment(p).is_some()
    }

    /// The segment under `p`, if any. Among overlapping segments of one cell the
    /// last drawn wins.
    pub fn hit_segment(&self, p: Point) -> Option<SegmentId> {
        let index = self.index.as_ref()?;
        index.get(p.x, p.y).ok().flatten().copied()
    }

    /// Share the current hit index, for example with a renderer thread.
    ///
    /// The returned index stays valid (and unchanged) when the annotation is
    /// edited afterwards; edits install a fresh index.
    pub fn hit_index(&self) -> Option<InkIndex> {
        self.index.clone()
    }

    fn notify_if(&mut self, changed: bool, what: Changed) -> bool {
        if changed {
            self.observers.notify(what);
        }
        changed
    }
}

/// Build the segment index for `paths`, or `None` if there are no points.
///
/// The extents are the bounding box of every point grown by the largest half
/// width; each segment is stored with its own box grown by its path's half width.
fn build_index(
    page: u32,
    paths: &[Vec<Point>],
    width: &StrokeWidth,
) -> Result<Option<InkIndex>, AnnotationError> {
    if let Some(w) = width.first_invalid() {
        return Err(AnnotationError::InvalidWidth(w));
    }
    if let StrokeWidth::PerPath(widths) = width
        && widths.len() != paths.len()
    {
        return Err(AnnotationError::WidthCountMismatch {
            widths: widths.len(),
            paths: paths.len(),
        });
    }
    if let Some(p) = paths.iter().flatten().find(|p| !p.is_finite()) {
        return Err(AnnotationError::InvalidPoint(*p));
    }
    let Some(bbox) = points_bbox(paths.iter().flatten()) else {
        return Ok(None);
    };
    let max_half = width.max() * 0.5;
    let extents = rect_to_aabb(bbox).inflate(max_half);
    let mut tree = MappingTree::new(page, extents)?;
    for (path_ix, path) in paths.iter().enumerate() {
        let half_width = width.of_path(path_ix) * 0.5;
        for (seg_ix, pair) in path.windows(2).enumerate() {
            let line = Line::new(pair[0], pair[1]);
            let bounds = rect_to_aabb(line.bounding_box()).inflate(half_width);
            let _ = tree.add(SegmentId::new(path_ix, seg_ix), bounds, SegmentHit { line, half_width })?;
        }
    }
    debug!(page, segments = tree.len(), "ink hit index rebuilt");
    Ok(Some(Arc::new(tree)))
}
