// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures shared by the unit tests.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect, Size};

use crate::annotation::{Declutterable, EyeDistance, PointMarker};
use crate::render::LabelSurface;
use crate::style::Rgba8;

/// Everything a [`TestFrame`] was asked to draw, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawCommand {
    Icon(u32),
    Shape(u32),
    Text(String, Point, Rgba8),
    Line(Line, f64, Rgba8),
}

/// A frame that measures text at 10 px per character and 12 px per line and
/// records draw calls.
#[derive(Debug, Default)]
pub(crate) struct TestFrame {
    pub(crate) commands: Vec<DrawCommand>,
}

impl LabelSurface for TestFrame {
    fn measure_text(&self, text: &str) -> Size {
        Size::new(10.0 * text.chars().count() as f64, 12.0)
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Rgba8) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), origin, color));
    }

    fn draw_line(&mut self, line: Line, width: f64, color: Rgba8) {
        self.commands.push(DrawCommand::Line(line, width, color));
    }
}

/// A point marker with fixed bounds, anchored at its bounds' center unless
/// told otherwise.
#[derive(Clone, Debug)]
pub(crate) struct Pin {
    pub(crate) id: u32,
    bounds: Option<Rect>,
    anchor: Option<Point>,
    text: Option<&'static str>,
    eye: f64,
}

impl Pin {
    pub(crate) fn new(id: u32, bounds: Rect) -> Self {
        Self {
            id,
            bounds: Some(bounds),
            anchor: None,
            text: None,
            eye: 1.0,
        }
    }

    pub(crate) fn hidden(id: u32) -> Self {
        Self {
            bounds: None,
            ..Self::new(id, Rect::ZERO)
        }
    }

    pub(crate) fn eye(mut self, eye: f64) -> Self {
        self.eye = eye;
        self
    }

    pub(crate) fn anchor(mut self, anchor: Point) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub(crate) fn text(mut self, text: &'static str) -> Self {
        self.text = Some(text);
        self
    }
}

impl EyeDistance for Pin {
    fn eye_distance(&self) -> f64 {
        self.eye
    }
}

impl Declutterable<TestFrame> for Pin {
    fn bounds(&self, _frame: &TestFrame) -> Option<Rect> {
        self.bounds
    }

    fn render(&self, frame: &mut TestFrame) {
        frame.commands.push(DrawCommand::Icon(self.id));
    }

    fn pick(&self, _frame: &TestFrame, point: Point) -> bool {
        self.bounds.is_some_and(|b| b.contains(point))
    }
}

impl PointMarker<TestFrame> for Pin {
    fn screen_anchor(&self, _frame: &TestFrame) -> Point {
        self.anchor
            .or(self.bounds.map(|b| b.center()))
            .unwrap_or(Point::ZERO)
    }

    fn label_text(&self) -> Option<&str> {
        self.text
    }
}

/// A generic shape with fixed bounds.
#[derive(Clone, Debug)]
pub(crate) struct Shape {
    pub(crate) id: u32,
    bounds: Option<Rect>,
    eye: f64,
}

impl Shape {
    pub(crate) fn new(id: u32, bounds: Rect) -> Self {
        Self {
            id,
            bounds: Some(bounds),
            eye: 1.0,
        }
    }

    pub(crate) fn hidden(id: u32) -> Self {
        Self {
            id,
            bounds: None,
            eye: 1.0,
        }
    }

    pub(crate) fn eye(mut self, eye: f64) -> Self {
        self.eye = eye;
        self
    }
}

impl EyeDistance for Shape {
    fn eye_distance(&self) -> f64 {
        self.eye
    }
}

impl Declutterable<TestFrame> for Shape {
    fn bounds(&self, _frame: &TestFrame) -> Option<Rect> {
        self.bounds
    }

    fn render(&self, frame: &mut TestFrame) {
        frame.commands.push(DrawCommand::Shape(self.id));
    }

    fn pick(&self, _frame: &TestFrame, point: Point) -> bool {
        self.bounds.is_some_and(|b| b.contains(point))
    }
}
