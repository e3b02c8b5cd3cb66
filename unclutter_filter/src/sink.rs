// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered-draw boundary: where filter output goes.

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::Point;

use crate::annotation::{Declutterable, EyeDistance};

/// Receives renderables from a filter pass.
///
/// The sink owns any further depth sorting and the actual drawing; a filter
/// only submits.
pub trait OrderedSink<T> {
    /// Accept one renderable for this frame.
    fn submit(&mut self, item: T);
}

impl<T> OrderedSink<T> for Vec<T> {
    #[inline]
    fn submit(&mut self, item: T) {
        self.push(item);
    }
}

/// A minimal ordered-draw stage: collects renderables, draws them farthest
/// first, and resolves picks to the nearest hit.
#[derive(Clone, Debug)]
pub struct EyeSortedSink<T> {
    items: Vec<T>,
}

impl<T> Default for EyeSortedSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EyeSortedSink<T> {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Submitted items, in their current order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items waiting to be drawn.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are waiting.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all pending items.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: EyeDistance> EyeSortedSink<T> {
    /// Order items farthest first. Items at equal distance keep submission order.
    ///
    /// An item whose eye distance is NaN is treated as infinitely far: it is
    /// drawn before everything else and loses every pick tie.
    pub fn sort_back_to_front(&mut self) {
        self.items.sort_by(|a, b| farther_first(a, b));
    }

    /// Draw every pending item back to front and empty the sink.
    pub fn flush<F>(&mut self, frame: &mut F)
    where
        F: ?Sized,
        T: Declutterable<F>,
    {
        self.sort_back_to_front();
        for item in self.items.drain(..) {
            item.render(frame);
        }
    }

    /// The nearest pending item reporting a hit at `point`.
    ///
    /// Among items at equal distance the earliest submitted wins.
    pub fn pick<F>(&self, frame: &F, point: Point) -> Option<&T>
    where
        F: ?Sized,
        T: Declutterable<F>,
    {
        self.items
            .iter()
            .filter(|item| item.pick(frame, point))
            .min_by(|a, b| farther_first(b, a))
    }
}

impl<T> OrderedSink<T> for EyeSortedSink<T> {
    #[inline]
    fn submit(&mut self, item: T) {
        self.items.push(item);
    }
}

fn farther_first<T: EyeDistance>(a: &T, b: &T) -> Ordering {
    depth_key(b).total_cmp(&depth_key(a))
}

// NaN maps to +inf and -0.0 to 0.0 so that `total_cmp` sees a total order
// that still treats both zeros as equal.
fn depth_key<T: EyeDistance>(item: &T) -> f64 {
    let d = item.eye_distance();
    if d.is_nan() { f64::INFINITY } else { d + 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCommand, Shape, TestFrame};
    use kurbo::Rect;

    fn square(id: u32, eye: f64) -> Shape {
        Shape::new(id, Rect::new(0.0, 0.0, 10.0, 10.0)).eye(eye)
    }

    #[test]
    fn flush_draws_back_to_front() {
        let mut frame = TestFrame::default();
        let mut sink = EyeSortedSink::new();
        sink.submit(square(1, 5.0));
        sink.submit(square(2, 50.0));
        sink.submit(square(3, 5.0));
        sink.submit(square(4, 20.0));
        sink.flush(&mut frame);
        assert!(sink.is_empty());
        assert_eq!(
            frame.commands,
            [
                DrawCommand::Shape(2),
                DrawCommand::Shape(4),
                DrawCommand::Shape(1),
                DrawCommand::Shape(3),
            ]
        );
    }

    #[test]
    fn pick_prefers_nearest_hit() {
        let frame = TestFrame::default();
        let mut sink = EyeSortedSink::new();
        sink.submit(square(1, 30.0));
        sink.submit(square(2, 10.0));
        sink.submit(square(3, 10.0));
        sink.submit(Shape::new(4, Rect::new(100.0, 100.0, 110.0, 110.0)).eye(1.0));

        let hit = sink.pick(&frame, Point::new(5.0, 5.0)).map(|s| s.id);
        assert_eq!(hit, Some(2));
        assert!(sink.pick(&frame, Point::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn nan_depth_does_not_scramble_finite_order() {
        let mut frame = TestFrame::default();
        let mut sink = EyeSortedSink::new();
        sink.submit(square(0, 1.0));
        sink.submit(square(1, f64::NAN));
        sink.submit(square(2, 5.0));
        sink.submit(square(3, 3.0));
        sink.submit(square(4, -0.0));
        sink.submit(square(5, 0.0));

        // Every square covers the probe; the NaN one is never the nearest.
        let hit = sink.pick(&frame, Point::new(5.0, 5.0)).map(|s| s.id);
        assert_eq!(hit, Some(4));

        sink.flush(&mut frame);
        assert_eq!(
            frame.commands,
            [
                DrawCommand::Shape(1),
                DrawCommand::Shape(2),
                DrawCommand::Shape(3),
                DrawCommand::Shape(0),
                DrawCommand::Shape(4),
                DrawCommand::Shape(5),
            ]
        );
    }

    #[test]
    fn lone_nan_hit_is_still_picked() {
        let frame = TestFrame::default();
        let mut sink = EyeSortedSink::new();
        sink.submit(square(1, f64::NAN));
        sink.submit(Shape::new(2, Rect::new(100.0, 100.0, 110.0, 110.0)).eye(1.0));
        let hit = sink.pick(&frame, Point::new(5.0, 5.0)).map(|s| s.id);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn vec_is_a_sink() {
        let mut out: Vec<u8> = Vec::new();
        out.submit(3);
        out.submit(1);
        assert_eq!(out, [3, 1]);
    }
}
