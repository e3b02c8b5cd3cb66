// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked label placement and leader line geometry.

use kurbo::{Line, Point, Rect, Size};

/// Screen-space placement of one stacked label and its leader line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LabelLayout {
    /// Where the label text is drawn.
    pub text_origin: Point,
    /// Measured size of the label text.
    pub label_size: Size,
    /// The marker's projected position; the leader line starts here.
    pub anchor: Point,
    /// The leader line end: the text origin or the text's right edge, whichever is closer to the anchor.
    pub leader_end: Point,
}

impl LabelLayout {
    /// Place a label of `label_size` for stack `slot` in `region`.
    ///
    /// Labels sit to the left of the region center, one label height apart per
    /// slot: the text origin is `(center.x - width, center.y + slot * height)`.
    pub fn compute(region: Rect, slot: i32, label_size: Size, anchor: Point) -> Self {
        let center = region.center();
        let text_origin = Point::new(
            center.x - label_size.width,
            center.y + f64::from(slot) * label_size.height,
        );
        let right_edge = Point::new(text_origin.x + label_size.width, text_origin.y);
        Self {
            text_origin,
            label_size,
            anchor,
            leader_end: closer_endpoint(anchor, text_origin, right_edge),
        }
    }

    /// The leader line from the anchor to the chosen end.
    #[inline]
    pub fn leader(&self) -> Line {
        Line::new(self.anchor, self.leader_end)
    }

    /// Rectangle covered by the label text.
    #[inline]
    pub fn text_rect(&self) -> Rect {
        Rect::from_origin_size(self.text_origin, self.label_size)
    }
}

/// Pick whichever of `first` and `second` is nearer to `anchor`.
///
/// Compares squared distances. Ties go to `first`.
#[inline]
pub fn closer_endpoint(anchor: Point, first: Point, second: Point) -> Point {
    if (second - anchor).hypot2() < (first - anchor).hypot2() {
        second
    } else {
        first
    }
}
