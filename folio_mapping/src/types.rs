// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

/// Axis-aligned bounding box in 2D world coordinates.
///
/// Used both for the extents of a [`MappingTree`](crate::MappingTree) and for the
/// bounds of the items inserted into it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2D {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (top)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (bottom)
    pub max_y: f64,
}

impl Aabb2D {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create an AABB from two arbitrary corners, ordering each axis.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Create an AABB from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Width of the box. Negative for inverted boxes.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box. Negative for inverted boxes.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether this AABB contains the point (edges inclusive). NaN is never contained.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Whether `other` lies entirely within this AABB (edges inclusive).
    pub fn contains_aabb(&self, other: &Self) -> bool {
        self.contains_point(other.min_x, other.min_y) && self.contains_point(other.max_x, other.max_y)
    }

    /// Grow the box by `d` on every side.
    #[must_use]
    pub fn inflate(&self, d: f64) -> Self {
        Self {
            min_x: self.min_x - d,
            min_y: self.min_y - d,
            max_x: self.max_x + d,
            max_y: self.max_y + d,
        }
    }

    /// True if all four coordinates are finite and neither axis is inverted.
    ///
    /// Zero-area boxes are well formed.
    pub fn is_well_formed(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_ordered() {
        let a = Aabb2D::from_corners(3.0, -1.0, -2.0, 4.0);
        assert_eq!(a, Aabb2D::new(-2.0, -1.0, 3.0, 4.0));
    }

    #[test]
    fn containment_is_inclusive_and_rejects_nan() {
        let a = Aabb2D::new(-1.0, -2.0, 1.0, 2.0);
        assert!(a.contains_point(1.0, 2.0));
        assert!(a.contains_point(-1.0, -2.0));
        assert!(!a.contains_point(1.0 + 1e-12, 0.0));
        assert!(!a.contains_point(f64::NAN, 0.0));
        assert!(a.contains_aabb(&Aabb2D::new(-0.5, 1.0, 0.0, 1.05)));
        assert!(!a.contains_aabb(&Aabb2D::new(-0.5, 1.0, 0.0, 2.5)));
    }

    #[test]
    fn inflated_box_contains_the_original() {
        let a = Aabb2D::new(10.0, 10.0, 60.0, 10.0);
        let grown = a.inflate(1.5);
        assert_eq!(grown, Aabb2D::new(8.5, 8.5, 61.5, 11.5));
        assert!(grown.contains_aabb(&a));
        assert!(!a.contains_aabb(&grown));
    }

    #[test]
    fn well_formed_allows_zero_area() {
        assert!(Aabb2D::new(0.0, 0.0, 0.0, 5.0).is_well_formed());
        assert!(!Aabb2D::new(1.0, 0.0, 0.0, 5.0).is_well_formed());
        assert!(!Aabb2D::new(0.0, 0.0, f64::INFINITY, 5.0).is_well_formed());
    }
}
