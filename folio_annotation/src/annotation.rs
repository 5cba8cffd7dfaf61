// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties shared by every annotation, the markup extension, and change observers.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;
use tracing::trace;

use crate::error::AnnotationError;
use crate::types::Changed;

/// Properties common to all annotations.
///
/// Setters return `true` when the stored value actually changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationProps {
    page: u32,
    name: Option<String>,
    contents: Option<String>,
    modified: Option<String>,
}

impl AnnotationProps {
    /// Properties of an annotation on page `page`.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Index of the page the annotation belongs to.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Name identifying the annotation among those of its page.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Text displayed by the annotation, or an alternate description of its content.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Last modification date, as stored in the document.
    pub fn modified(&self) -> Option<&str> {
        self.modified.as_deref()
    }

    /// Set the name.
    pub fn set_name(&mut self, name: Option<&str>) -> bool {
        replace_str(&mut self.name, name)
    }

    /// Set the contents.
    pub fn set_contents(&mut self, contents: Option<&str>) -> bool {
        replace_str(&mut self.contents, contents)
    }

    /// Set the modification date.
    pub fn set_modified(&mut self, modified: Option<&str>) -> bool {
        replace_str(&mut self.modified, modified)
    }

    /// Two annotations are the same annotation when their names match.
    pub fn same_as(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Properties of markup annotations (ink, text markup, notes).
#[derive(Clone, Debug, PartialEq)]
pub struct MarkupProps {
    label: String,
    opacity: f64,
    has_popup: bool,
    popup_rect: Rect,
    popup_is_open: bool,
}

impl Default for MarkupProps {
    fn default() -> Self {
        Self {
            label: String::new(),
            opacity: 1.0,
            has_popup: false,
            popup_rect: Rect::ZERO,
            popup_is_open: false,
        }
    }
}

impl MarkupProps {
    /// Author label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Opacity in `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Whether the annotation has a popup window.
    pub fn has_popup(&self) -> bool {
        self.has_popup
    }

    /// Page-space rectangle of the popup.
    pub fn popup_rect(&self) -> Rect {
        self.popup_rect
    }

    /// Whether the popup is currently shown.
    pub fn popup_is_open(&self) -> bool {
        self.popup_is_open
    }

    /// Set the author label.
    pub fn set_label(&mut self, label: &str) -> bool {
        if self.label == label {
            return false;
        }
        self.label.clear();
        self.label.push_str(label);
        true
    }

    /// Set the opacity.
    ///
    /// # Errors
    ///
    /// [`AnnotationError::InvalidOpacity`] unless `opacity` is within `0.0..=1.0`.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<bool, AnnotationError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(AnnotationError::InvalidOpacity(opacity));
        }
        Ok(replace(&mut self.opacity, opacity))
    }

    /// Set whether the annotation has a popup.
    pub fn set_has_popup(&mut self, has_popup: bool) -> bool {
        replace(&mut self.has_popup, has_popup)
    }

    /// Set the popup rectangle.
    pub fn set_popup_rect(&mut self, rect: Rect) -> bool {
        replace(&mut self.popup_rect, rect)
    }

    /// Show or hide the popup.
    pub fn set_popup_is_open(&mut self, open: bool) -> bool {
        replace(&mut self.popup_is_open, open)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn replace_str(slot: &mut Option<String>, value: Option<&str>) -> bool {
    if slot.as_deref() == value {
        return false;
    }
    *slot = value.map(String::from);
    true
}

/// Handle returned by [`Observers::connect`], used to disconnect the callback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObserverId(u64);

/// Callback invoked with the set of properties that changed.
pub type ObserverFn = Box<dyn FnMut(Changed) + Send + Sync>;

/// Change observers of one annotation.
#[derive(Default)]
pub struct Observers {
    next: u64,
    list: Vec<(ObserverId, ObserverFn)>,
}

impl core::fmt::Debug for Observers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("connected", &self.list.len())
            .finish_non_exhaustive()
    }
}

impl Observers {
    /// Register `f`; it is called after every effective change, in connection order.
    pub fn connect<F>(&mut self, f: F) -> ObserverId
    where
        F: FnMut(Changed) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next);
        self.next += 1;
        self.list.push((id, Box::new(f)));
        id
    }

    /// Remove a callback. Returns `false` if `id` was not connected.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.list.len();
        self.list.retain(|(other, _)| *other != id);
        self.list.len() != before
    }

    /// Number of connected callbacks.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True if no callback is connected.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub(crate) fn notify(&mut self, changed: Changed) {
        trace!(?changed, observers = self.list.len(), "annotation changed");
        for (_, f) in &mut self.list {
            f(changed);
        }
    }
}
