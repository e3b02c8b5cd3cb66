// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placemark decluttering over a toy map view.
//!
//! This example shows how to combine:
//! - a host frame that projects positions and draws (here: prints draw calls),
//! - `unclutter_filter::PlacemarkFilter` to collapse crowded placemarks,
//! - `unclutter_filter::EyeSortedSink` to draw back to front and pick.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p unclutter_demos --example declutter_pins`

use kurbo::{Line, Point, Rect, Size, Vec2};
use unclutter_filter::{
    Annotation, ClutterFilter, Declutterable, EyeDistance, EyeSortedSink, LabelSurface,
    PlacemarkFilter, PointMarker, Rgba8,
};

/// A flat map camera: degrees to pixels, plus a draw log.
struct MapFrame {
    center: Point,
    pixels_per_degree: f64,
    viewport: Size,
    draws: usize,
}

impl MapFrame {
    fn project(&self, lon_lat: Point) -> Point {
        let d = (lon_lat - self.center) * self.pixels_per_degree;
        // Screen y grows downwards while latitude grows northwards.
        Point::new(
            0.5 * self.viewport.width + d.x,
            0.5 * self.viewport.height - d.y,
        )
    }
}

impl LabelSurface for MapFrame {
    fn measure_text(&self, text: &str) -> Size {
        Size::new(7.0 * text.chars().count() as f64, 13.0)
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Rgba8) {
        self.draws += 1;
        println!(
            "  text  {text:?} at ({:.1}, {:.1}) rgba({}, {}, {}, {})",
            origin.x, origin.y, color.r, color.g, color.b, color.a
        );
    }

    fn draw_line(&mut self, line: Line, width: f64, _color: Rgba8) {
        self.draws += 1;
        println!(
            "  line  ({:.1}, {:.1}) -> ({:.1}, {:.1}) width {width}",
            line.p0.x, line.p0.y, line.p1.x, line.p1.y
        );
    }
}

/// A point placemark: a 16 px icon with a name.
#[derive(Debug)]
struct Placemark {
    name: &'static str,
    lon_lat: Point,
    eye: f64,
}

const ICON: Size = Size::new(16.0, 16.0);

impl EyeDistance for Placemark {
    fn eye_distance(&self) -> f64 {
        self.eye
    }
}

impl Declutterable<MapFrame> for Placemark {
    fn bounds(&self, frame: &MapFrame) -> Option<Rect> {
        let p = frame.project(self.lon_lat);
        let view = Rect::from_origin_size(Point::ORIGIN, frame.viewport);
        view.contains(p).then(|| Rect::from_center_size(p, ICON))
    }

    fn render(&self, frame: &mut MapFrame) {
        let p = frame.project(self.lon_lat);
        frame.draws += 1;
        println!("  icon  {} at ({:.1}, {:.1})", self.name, p.x, p.y);
        let label_at = p + Vec2::new(0.5 * ICON.width + 2.0, 0.0);
        frame.draw_text(self.name, label_at, Rgba8::WHITE);
    }

    fn pick(&self, frame: &MapFrame, point: Point) -> bool {
        self.bounds(frame).is_some_and(|b| b.contains(point))
    }
}

impl PointMarker<MapFrame> for Placemark {
    fn screen_anchor(&self, frame: &MapFrame) -> Point {
        frame.project(self.lon_lat)
    }

    fn label_text(&self) -> Option<&str> {
        Some(self.name)
    }
}

/// A non-placemark overlay such as a measurement box.
#[derive(Debug)]
struct Overlay {
    name: &'static str,
    screen: Rect,
}

impl EyeDistance for Overlay {
    fn eye_distance(&self) -> f64 {
        0.0
    }
}

impl Declutterable<MapFrame> for Overlay {
    fn bounds(&self, _frame: &MapFrame) -> Option<Rect> {
        Some(self.screen)
    }

    fn render(&self, frame: &mut MapFrame) {
        frame.draws += 1;
        println!("  shape {} {:?}", self.name, self.screen);
    }

    fn pick(&self, _frame: &MapFrame, point: Point) -> bool {
        self.screen.contains(point)
    }
}

fn placemark(name: &'static str, lon: f64, lat: f64, eye: f64) -> Annotation<Placemark, Overlay> {
    Annotation::Marker(Placemark {
        name,
        lon_lat: Point::new(lon, lat),
        eye,
    })
}

fn main() {
    env_logger::init();

    let scene = vec![
        placemark("Geneva", 6.14, 46.20, 910.0),
        placemark("Lausanne", 6.63, 46.52, 905.0),
        placemark("Montreux", 6.91, 46.43, 903.0),
        placemark("Zurich", 8.54, 47.37, 890.0),
        placemark("Winterthur", 8.72, 47.50, 889.0),
        placemark("Lugano", 8.95, 46.00, 920.0),
        placemark("Reykjavik", -21.9, 64.1, 2500.0),
        Annotation::Generic(Overlay {
            name: "scale bar",
            screen: Rect::new(20.0, 560.0, 140.0, 580.0),
        }),
    ];

    let mut filter = PlacemarkFilter::new();
    for (zoom, pixels_per_degree) in [("wide", 20.0), ("close", 160.0)] {
        let mut frame = MapFrame {
            center: Point::new(7.8, 46.8),
            pixels_per_degree,
            viewport: Size::new(800.0, 600.0),
            draws: 0,
        };

        println!("\n== {zoom} view: {pixels_per_degree} px/degree ==");
        let mut sink = EyeSortedSink::new();
        let stats = filter.apply(&frame, &scene, &mut sink);
        println!(
            "{} annotations -> {} regions, {} labels, {} dropped",
            stats.annotations, stats.regions, stats.labels, stats.dropped
        );

        let probe = frame.project(Point::new(8.54, 47.37));
        match sink.pick(&frame, probe) {
            Some(hit) => println!("pick at Zurich: {hit:?}"),
            None => println!("pick at Zurich: nothing (decluttered labels are not pickable)"),
        }

        sink.flush(&mut frame);
        println!("{} draw calls", frame.draws);
    }
}
