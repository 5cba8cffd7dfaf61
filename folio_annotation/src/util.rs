// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_mapping::Aabb2D;
use kurbo::{Point, Rect};

pub(crate) fn rect_to_aabb(r: Rect) -> Aabb2D {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Bounding box of a set of points, `None` if there are none.
pub(crate) fn points_bbox<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Rect> {
    let mut it = points.into_iter().copied();
    let first = it.next()?;
    Some(it.fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_of_points() {
        let pts = [Point::new(3.0, -1.0), Point::new(-2.0, 4.0), Point::new(0.0, 0.0)];
        assert_eq!(points_bbox(&pts), Some(Rect::new(-2.0, -1.0, 3.0, 4.0)));
        assert_eq!(points_bbox(core::iter::empty()), None);
        assert_eq!(
            rect_to_aabb(Rect::new(-2.0, -1.0, 3.0, 4.0)),
            Aabb2D::new(-2.0, -1.0, 3.0, 4.0)
        );
    }
}
