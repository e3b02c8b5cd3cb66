// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a filter pass hands to the ordered-draw stage.

use core::fmt;

use kurbo::{Line, Point, Rect, Size};

use crate::annotation::{Declutterable, EyeDistance, PointMarker};
use crate::label::DeclutteredLabel;
use crate::style::Rgba8;

/// Text measurement and primitive drawing a frame must offer to draw
/// decluttered labels.
///
/// Coordinates are screen pixels, y down. How text is shaped, which font is
/// used, and how lines are rasterized is up to the host.
pub trait LabelSurface {
    /// Size of `text` as it would be drawn by [`draw_text`](Self::draw_text).
    fn measure_text(&self, text: &str) -> Size;

    /// Draw `text` with its layout origin at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Rgba8);

    /// Stroke a straight line.
    fn draw_line(&mut self, line: Line, width: f64, color: Rgba8);
}

/// One item emitted by a clutter filter pass.
///
/// Markers and generic shapes are passed through untouched; crowded markers
/// are replaced by [`DeclutteredLabel`]s.
pub enum Renderable<'a, M, G> {
    /// A point marker drawn normally: icon plus its own label.
    Marker(&'a M),
    /// A non-marker shape drawn normally.
    Generic(&'a G),
    /// A crowded point marker drawn as a stacked label.
    Label(DeclutteredLabel<'a, M>),
}

impl<M, G> Clone for Renderable<'_, M, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, G> Copy for Renderable<'_, M, G> {}

impl<M: fmt::Debug, G: fmt::Debug> fmt::Debug for Renderable<'_, M, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker(m) => f.debug_tuple("Marker").field(m).finish(),
            Self::Generic(g) => f.debug_tuple("Generic").field(g).finish(),
            Self::Label(l) => f
                .debug_tuple("Label")
                .field(l)
                .field(&l.marker())
                .finish(),
        }
    }
}

impl<'a, M, G> Renderable<'a, M, G> {
    /// The stacked label, if this item is one.
    #[inline]
    pub fn as_label(&self) -> Option<&DeclutteredLabel<'a, M>> {
        match self {
            Self::Label(l) => Some(l),
            _ => None,
        }
    }

    /// Whether this item is a stacked label.
    #[inline]
    pub fn is_label(&self) -> bool {
        matches!(self, Self::Label(_))
    }

    /// The marker behind this item, whether drawn normally or as a label.
    #[inline]
    pub fn marker(&self) -> Option<&'a M> {
        match *self {
            Self::Marker(m) => Some(m),
            Self::Label(l) => Some(l.marker()),
            Self::Generic(_) => None,
        }
    }

    /// The generic shape behind this item.
    #[inline]
    pub fn generic(&self) -> Option<&'a G> {
        match *self {
            Self::Generic(g) => Some(g),
            _ => None,
        }
    }
}

impl<M: EyeDistance, G: EyeDistance> EyeDistance for Renderable<'_, M, G> {
    fn eye_distance(&self) -> f64 {
        match self {
            Self::Marker(m) => m.eye_distance(),
            Self::Generic(g) => g.eye_distance(),
            Self::Label(l) => l.eye_distance(),
        }
    }
}

impl<F, M, G> Declutterable<F> for Renderable<'_, M, G>
where
    F: LabelSurface + ?Sized,
    M: PointMarker<F>,
    G: Declutterable<F>,
{
    /// For labels, the rectangle covered by the stacked text.
    fn bounds(&self, frame: &F) -> Option<Rect> {
        match self {
            Self::Marker(m) => m.bounds(frame),
            Self::Generic(g) => g.bounds(frame),
            Self::Label(l) => Some(l.layout(frame).text_rect()),
        }
    }

    fn render(&self, frame: &mut F) {
        match self {
            Self::Marker(m) => m.render(frame),
            Self::Generic(g) => g.render(frame),
            Self::Label(l) => l.render(frame),
        }
    }

    fn pick(&self, frame: &F, point: Point) -> bool {
        match self {
            Self::Marker(m) => m.pick(frame, point),
            Self::Generic(g) => g.pick(frame, point),
            Self::Label(l) => l.pick(frame, point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use crate::style::LabelStyle;
    use crate::testing::{DrawCommand, Pin, Shape, TestFrame};

    #[test]
    fn passthrough_items_render_themselves() {
        let mut frame = TestFrame::default();
        let pin = Pin::new(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        let shape = Shape::new(2, Rect::new(0.0, 0.0, 10.0, 10.0));
        let a: Renderable<'_, Pin, Shape> = Renderable::Marker(&pin);
        let b: Renderable<'_, Pin, Shape> = Renderable::Generic(&shape);
        a.render(&mut frame);
        b.render(&mut frame);
        assert_eq!(
            frame.commands,
            [DrawCommand::Icon(1), DrawCommand::Shape(2)]
        );
        assert!(a.pick(&frame, Point::new(5.0, 5.0)));
        assert!(b.pick(&frame, Point::new(5.0, 5.0)));
    }

    #[test]
    fn label_keeps_marker_depth_but_not_pickability() {
        let frame = TestFrame::default();
        let pin = Pin::new(1, Rect::new(0.0, 0.0, 10.0, 10.0))
            .eye(12.0)
            .text("ab");
        let label = DeclutteredLabel::new(0, &pin, Rect::new(0.0, 0.0, 20.0, 20.0), LabelStyle::default());
        let r: Renderable<'_, Pin, Shape> = Renderable::Label(label);

        assert!(r.is_label());
        assert_eq!(r.eye_distance(), 12.0);
        assert!(!r.pick(&frame, Point::new(5.0, 5.0)));
        assert!(core::ptr::eq(r.marker().unwrap(), &pin));
        assert!(r.generic().is_none());
        // "ab" is 20 x 12; left of the region center at slot 0.
        assert_eq!(r.bounds(&frame), Some(Rect::new(-10.0, 10.0, 10.0, 22.0)));
    }

    #[test]
    fn debug_shows_the_source_annotation() {
        let pin = Pin::new(7, Rect::new(0.0, 0.0, 10.0, 10.0));
        let shape = Shape::new(8, Rect::new(0.0, 0.0, 10.0, 10.0));
        let marker: Renderable<'_, Pin, Shape> = Renderable::Marker(&pin);
        let generic: Renderable<'_, Pin, Shape> = Renderable::Generic(&shape);
        let label: Renderable<'_, Pin, Shape> = Renderable::Label(DeclutteredLabel::new(
            -1,
            &pin,
            Rect::new(0.0, 0.0, 20.0, 20.0),
            LabelStyle::default(),
        ));

        let marker = format!("{marker:?}");
        assert!(marker.starts_with("Marker(Pin {"), "{marker}");
        assert!(marker.contains("id: 7"), "{marker}");
        assert!(format!("{generic:?}").contains("id: 8"));
        let label = format!("{label:?}");
        assert!(label.contains("slot: -1"), "{label}");
        assert!(label.contains("id: 7"), "{label}");
    }
}
