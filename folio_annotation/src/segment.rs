// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing of thick line segments.

use folio_mapping::HitTest;
use kurbo::{Line, Point};

use crate::types::SegmentId;

/// Whether `p` lies within `half_width` of the segment `line`.
///
/// When the projection of `p` falls between the endpoints, the perpendicular
/// distance decides; otherwise the distance to the nearer endpoint does. The
/// stroke therefore has round caps.
///
/// ```
/// use folio_annotation::segment_hit;
/// use kurbo::{Line, Point};
///
/// let line = Line::new((0.0, 0.0), (10.0, 0.0));
/// assert!(segment_hit(line, 1.0, Point::new(5.0, 0.9)));
/// assert!(segment_hit(line, 1.0, Point::new(10.5, 0.5)));
/// assert!(!segment_hit(line, 1.0, Point::new(10.9, 0.9)));
/// ```
pub fn segment_hit(line: Line, half_width: f64, p: Point) -> bool {
    let hw_sq = half_width * half_width;
    let d = line.p1 - line.p0;
    let a = p - line.p0;
    let len_sq = d.hypot2();
    if len_sq > 0.0 {
        let proj = a.dot(d);
        if (0.0..=len_sq).contains(&proj) {
            return a.hypot2() - proj * proj / len_sq <= hw_sq;
        }
    }
    a.hypot2() <= hw_sq || (p - line.p1).hypot2() <= hw_sq
}

/// Predicate stored in the hit index for one ink segment.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SegmentHit {
    pub(crate) line: Line,
    pub(crate) half_width: f64,
}

impl HitTest<SegmentId> for SegmentHit {
    fn hit_test(&self, _item: &SegmentId, x: f64, y: f64) -> bool {
        segment_hit(self.line, self.half_width, Point::new(x, y))
    }
}
