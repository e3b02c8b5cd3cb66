// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability every screen annotation exposes to the filter.

use kurbo::{Point, Rect};

/// Distance from the eye point, used to sort renderables back to front.
pub trait EyeDistance {
    /// Distance from the eye point to the item's reference position.
    fn eye_distance(&self) -> f64;
}

/// A screen-space annotation that can take part in decluttering.
///
/// `F` is the host's frame context: whatever the annotation needs to project
/// itself, measure text, or issue draw calls for the current frame. The filter
/// never looks inside it; it only hands it back to these methods.
pub trait Declutterable<F: ?Sized>: EyeDistance {
    /// Screen-space bounds for the current frame, in pixels.
    ///
    /// Returns `None` when the annotation has nothing on screen this frame
    /// (culled, behind the eye, not yet laid out). Such annotations are
    /// skipped by the filter for the frame.
    fn bounds(&self, frame: &F) -> Option<Rect>;

    /// Draw the annotation's full representation.
    fn render(&self, frame: &mut F);

    /// Whether the annotation's drawn representation is hit at `point`.
    fn pick(&self, frame: &F, point: Point) -> bool;
}

/// An annotation anchored to a single point, drawn as an icon plus an
/// optional text label.
///
/// Only point markers are collapsed into stacked labels when they crowd each
/// other; any other [`Declutterable`] is opaque to the stacking policy.
pub trait PointMarker<F: ?Sized>: Declutterable<F> {
    /// The projected reference position: where the leader line starts.
    fn screen_anchor(&self, frame: &F) -> Point;

    /// The marker's label text, if it has one.
    fn label_text(&self) -> Option<&str>;
}

impl<T: EyeDistance + ?Sized> EyeDistance for &T {
    #[inline]
    fn eye_distance(&self) -> f64 {
        (**self).eye_distance()
    }
}

impl<F: ?Sized, T: Declutterable<F> + ?Sized> Declutterable<F> for &T {
    #[inline]
    fn bounds(&self, frame: &F) -> Option<Rect> {
        (**self).bounds(frame)
    }

    #[inline]
    fn render(&self, frame: &mut F) {
        (**self).render(frame);
    }

    #[inline]
    fn pick(&self, frame: &F, point: Point) -> bool {
        (**self).pick(frame, point)
    }
}

impl<F: ?Sized, T: PointMarker<F> + ?Sized> PointMarker<F> for &T {
    #[inline]
    fn screen_anchor(&self, frame: &F) -> Point {
        (**self).screen_anchor(frame)
    }

    #[inline]
    fn label_text(&self) -> Option<&str> {
        (**self).label_text()
    }
}

/// An annotation handed to a clutter filter: either a point marker, which may
/// be collapsed into a stacked label, or any other shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Annotation<M, G> {
    /// A point marker; eligible for label stacking.
    Marker(M),
    /// Any other screen shape; rendered unchanged or dropped.
    Generic(G),
}

impl<M, G> Annotation<M, G> {
    /// Whether this is a point marker.
    #[inline]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }

    /// The marker payload, if this is a point marker.
    #[inline]
    pub const fn as_marker(&self) -> Option<&M> {
        match self {
            Self::Marker(m) => Some(m),
            Self::Generic(_) => None,
        }
    }

    /// The generic payload, if this is not a point marker.
    #[inline]
    pub const fn as_generic(&self) -> Option<&G> {
        match self {
            Self::Marker(_) => None,
            Self::Generic(g) => Some(g),
        }
    }
}

impl<M: EyeDistance, G: EyeDistance> EyeDistance for Annotation<M, G> {
    fn eye_distance(&self) -> f64 {
        match self {
            Self::Marker(m) => m.eye_distance(),
            Self::Generic(g) => g.eye_distance(),
        }
    }
}

impl<F, M, G> Declutterable<F> for Annotation<M, G>
where
    F: ?Sized,
    M: PointMarker<F>,
    G: Declutterable<F>,
{
    fn bounds(&self, frame: &F) -> Option<Rect> {
        match self {
            Self::Marker(m) => m.bounds(frame),
            Self::Generic(g) => g.bounds(frame),
        }
    }

    fn render(&self, frame: &mut F) {
        match self {
            Self::Marker(m) => m.render(frame),
            Self::Generic(g) => g.render(frame),
        }
    }

    fn pick(&self, frame: &F, point: Point) -> bool {
        match self {
            Self::Marker(m) => m.pick(frame, point),
            Self::Generic(g) => g.pick(frame, point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Pin, Shape, TestFrame};

    #[test]
    fn annotation_dispatches_to_payload() {
        let frame = TestFrame::default();
        let pin = Pin::new(1, Rect::new(0.0, 0.0, 10.0, 10.0)).eye(7.0);
        let shape = Shape::new(2, Rect::new(50.0, 50.0, 60.0, 60.0)).eye(3.0);

        let a: Annotation<&Pin, &Shape> = Annotation::Marker(&pin);
        let b: Annotation<&Pin, &Shape> = Annotation::Generic(&shape);

        assert!(a.is_marker());
        assert!(!b.is_marker());
        assert_eq!(a.eye_distance(), 7.0);
        assert_eq!(b.eye_distance(), 3.0);
        assert_eq!(b.bounds(&frame), Some(Rect::new(50.0, 50.0, 60.0, 60.0)));
        assert!(a.pick(&frame, Point::new(5.0, 5.0)));
        assert!(!b.pick(&frame, Point::new(5.0, 5.0)));
        assert!(a.as_generic().is_none());
        assert_eq!(b.as_generic().map(|s| s.id), Some(2));
    }
}
