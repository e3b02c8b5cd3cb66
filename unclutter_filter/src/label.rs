// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked stand-in for a crowded point marker.

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::annotation::{EyeDistance, PointMarker};
use crate::leader::LabelLayout;
use crate::render::LabelSurface;
use crate::style::LabelStyle;

/// A point marker drawn as a stacked text label with a leader line back to
/// its anchor, in place of its icon.
///
/// Labels are produced by the placemark filter for regions holding two or
/// more markers and live only until the frame's ordered-draw pass consumes
/// them. They borrow their marker and never own it.
pub struct DeclutteredLabel<'a, M> {
    slot: i32,
    marker: &'a M,
    region: Rect,
    style: LabelStyle,
}

impl<M> Clone for DeclutteredLabel<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for DeclutteredLabel<'_, M> {}

impl<M> fmt::Debug for DeclutteredLabel<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclutteredLabel")
            .field("slot", &self.slot)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl<'a, M> DeclutteredLabel<'a, M> {
    /// Create a label for `marker` at stack `slot` within `region`.
    pub fn new(slot: i32, marker: &'a M, region: Rect, style: LabelStyle) -> Self {
        Self {
            slot,
            marker,
            region,
            style,
        }
    }

    /// Vertical stack position, in label heights from the region center.
    #[inline]
    pub fn slot(&self) -> i32 {
        self.slot
    }

    /// The marker this label stands in for.
    #[inline]
    pub fn marker(&self) -> &'a M {
        self.marker
    }

    /// Rectangle of the region the label is stacked in.
    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Style used when drawing.
    #[inline]
    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Compute where the text and leader line go for this frame.
    pub fn layout<F>(&self, frame: &F) -> LabelLayout
    where
        F: LabelSurface + ?Sized,
        M: PointMarker<F>,
    {
        let size = self
            .marker
            .label_text()
            .map_or(Size::ZERO, |text| frame.measure_text(text));
        LabelLayout::compute(
            self.region,
            self.slot,
            size,
            self.marker.screen_anchor(frame),
        )
    }

    /// Draw the leader line, then the text twice: the outline copy offset by
    /// the style's outline offset, then the fill copy on top.
    pub fn render<F>(&self, frame: &mut F)
    where
        F: LabelSurface + ?Sized,
        M: PointMarker<F>,
    {
        let layout = self.layout(frame);
        frame.draw_line(layout.leader(), self.style.leader_width, self.style.leader);
        if let Some(text) = self.marker.label_text() {
            frame.draw_text(
                text,
                layout.text_origin + self.style.outline_offset,
                self.style.outline,
            );
            frame.draw_text(text, layout.text_origin, self.style.fill);
        }
    }

    /// Decluttered labels are never pickable.
    #[inline]
    pub fn pick<F: ?Sized>(&self, _frame: &F, _point: Point) -> bool {
        false
    }
}

/// A label sorts exactly where its marker would.
impl<M: EyeDistance> EyeDistance for DeclutteredLabel<'_, M> {
    #[inline]
    fn eye_distance(&self) -> f64 {
        self.marker.eye_distance()
    }
}
