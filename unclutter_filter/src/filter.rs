// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clutter filters: one pass per frame from annotations to renderables.

use core::ops::{Deref, DerefMut};

use crate::annotation::{Annotation, Declutterable, PointMarker};
use crate::label::DeclutteredLabel;
use crate::region::{PLACEMARK_CAPTURE_SCALE, Region, RegionSet};
use crate::render::Renderable;
use crate::sink::OrderedSink;
use crate::style::{LabelStyle, StyleError};

/// Counters describing one filter pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Annotations handed to the pass.
    pub annotations: usize,
    /// Regions created.
    pub regions: usize,
    /// Annotations that produced nothing: no usable bounds, or discarded by
    /// the region policy.
    pub dropped: usize,
    /// Stacked labels synthesized.
    pub labels: usize,
    /// Renderables submitted to the sink, labels included.
    pub emitted: usize,
}

/// A per-frame policy deciding which annotations are drawn, and how.
///
/// Filters keep no state between calls. Every call groups the annotations
/// from scratch, submits its output to `sink`, and forgets the grouping
/// before returning, whether it returns normally or unwinds.
pub trait ClutterFilter {
    /// Filter `annotations` for the current frame into `sink`.
    fn apply<'a, F, M, G, S>(
        &mut self,
        frame: &F,
        annotations: &'a [Annotation<M, G>],
        sink: &mut S,
    ) -> PassStats
    where
        F: ?Sized,
        M: PointMarker<F>,
        G: Declutterable<F>,
        S: OrderedSink<Renderable<'a, M, G>> + ?Sized;
}

/// Clears the region arena when the pass ends, including on unwind.
struct PassScope<'s>(&'s mut RegionSet);

impl Deref for PassScope<'_> {
    type Target = RegionSet;

    fn deref(&self) -> &RegionSet {
        &*self.0
    }
}

impl DerefMut for PassScope<'_> {
    fn deref_mut(&mut self) -> &mut RegionSet {
        &mut *self.0
    }
}

impl Drop for PassScope<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

/// Collapses crowded point markers into stacked, leader-lined labels.
///
/// Each annotation joins the first region its bounds overlap, or opens a
/// region twice its size around the same center. Then, per region:
///
/// - the first generic member is emitted unchanged; later ones are dropped,
/// - a lone point marker is emitted unchanged,
/// - two or more point markers are each replaced by a [`DeclutteredLabel`],
///   stacked in member order with slots `-n + 1, ..., 0`.
///
/// ```
/// use kurbo::{Line, Point, Rect, Size};
/// use unclutter_filter::{
///     Annotation, ClutterFilter, Declutterable, EyeDistance, LabelSurface, PlacemarkFilter,
///     PointMarker, Renderable, Rgba8,
/// };
///
/// struct Frame;
/// impl LabelSurface for Frame {
///     fn measure_text(&self, text: &str) -> Size {
///         Size::new(8.0 * text.len() as f64, 12.0)
///     }
///     fn draw_text(&mut self, _: &str, _: Point, _: Rgba8) {}
///     fn draw_line(&mut self, _: Line, _: f64, _: Rgba8) {}
/// }
///
/// struct Pin(Point);
/// impl EyeDistance for Pin {
///     fn eye_distance(&self) -> f64 {
///         1.0
///     }
/// }
/// impl Declutterable<Frame> for Pin {
///     fn bounds(&self, _: &Frame) -> Option<Rect> {
///         Some(Rect::from_center_size(self.0, (16.0, 16.0)))
///     }
///     fn render(&self, _: &mut Frame) {}
///     fn pick(&self, _: &Frame, pt: Point) -> bool {
///         self.0.distance(pt) < 8.0
///     }
/// }
/// impl PointMarker<Frame> for Pin {
///     fn screen_anchor(&self, _: &Frame) -> Point {
///         self.0
///     }
///     fn label_text(&self) -> Option<&str> {
///         Some("pin")
///     }
/// }
///
/// let pins = [
///     Annotation::<Pin, Pin>::Marker(Pin(Point::new(100.0, 100.0))),
///     Annotation::Marker(Pin(Point::new(104.0, 102.0))),
///     Annotation::Marker(Pin(Point::new(400.0, 100.0))),
/// ];
///
/// let mut filter = PlacemarkFilter::new();
/// let mut out = Vec::new();
/// let stats = filter.apply(&Frame, &pins, &mut out);
///
/// // The first two crowd each other and become labels; the third stays an icon.
/// assert_eq!(stats.labels, 2);
/// assert!(out[0].is_label() && out[1].is_label());
/// assert!(matches!(out[2], Renderable::Marker(_)));
/// ```
#[derive(Clone, Debug)]
pub struct PlacemarkFilter {
    regions: RegionSet,
    style: LabelStyle,
}

impl Default for PlacemarkFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacemarkFilter {
    /// Create a filter drawing labels with the default [`LabelStyle`].
    pub fn new() -> Self {
        Self {
            regions: RegionSet::with_capture_scale(PLACEMARK_CAPTURE_SCALE),
            style: LabelStyle::default(),
        }
    }

    /// Create a filter drawing labels with `style`.
    pub fn with_style(style: LabelStyle) -> Result<Self, StyleError> {
        style.validate()?;
        Ok(Self {
            style,
            ..Self::new()
        })
    }

    /// Style copied into every label this filter produces.
    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Whether no pass state is held. Always true between calls to
    /// [`apply`](ClutterFilter::apply).
    pub fn is_idle(&self) -> bool {
        self.regions.is_empty()
    }
}

impl ClutterFilter for PlacemarkFilter {
    fn apply<'a, F, M, G, S>(
        &mut self,
        frame: &F,
        annotations: &'a [Annotation<M, G>],
        sink: &mut S,
    ) -> PassStats
    where
        F: ?Sized,
        M: PointMarker<F>,
        G: Declutterable<F>,
        S: OrderedSink<Renderable<'a, M, G>> + ?Sized,
    {
        let style = self.style;
        let mut regions = PassScope(&mut self.regions);
        let mut stats = PassStats {
            annotations: annotations.len(),
            ..PassStats::default()
        };
        stats.dropped = regions.collect(frame, annotations);
        stats.regions = regions.len();

        for (_, region) in regions.iter() {
            stack_region(region, annotations, style, sink, &mut stats);
        }
        log::debug!(
            "placemark pass: {} annotations, {} regions, {} labels, {} emitted, {} dropped",
            stats.annotations,
            stats.regions,
            stats.labels,
            stats.emitted,
            stats.dropped
        );
        stats
    }
}

fn stack_region<'a, M, G, S>(
    region: &Region,
    annotations: &'a [Annotation<M, G>],
    style: LabelStyle,
    sink: &mut S,
    stats: &mut PassStats,
) where
    S: OrderedSink<Renderable<'a, M, G>> + ?Sized,
{
    let mut first_generic: Option<&'a G> = None;
    let mut first_marker: Option<&'a M> = None;
    let mut markers = 0_usize;
    let mut extra_generics = 0_usize;
    for &i in region.members() {
        let annotation: &'a Annotation<M, G> = &annotations[i];
        match annotation {
            Annotation::Marker(m) => {
                markers += 1;
                if first_marker.is_none() {
                    first_marker = Some(m);
                }
            }
            Annotation::Generic(g) => {
                if first_generic.is_none() {
                    first_generic = Some(g);
                } else {
                    extra_generics += 1;
                }
            }
        }
    }

    if let Some(g) = first_generic {
        sink.submit(Renderable::Generic(g));
        stats.emitted += 1;
    }
    if extra_generics > 0 {
        log::debug!("region {:?}: dropped {extra_generics} extra generic shapes", region.rect());
        stats.dropped += extra_generics;
    }

    match (markers, first_marker) {
        (_, None) => {}
        (1, Some(m)) => {
            sink.submit(Renderable::Marker(m));
            stats.emitted += 1;
        }
        (n, Some(_)) => {
            let mut slot = -i32::try_from(n).unwrap_or(i32::MAX);
            for &i in region.members() {
                let annotation: &'a Annotation<M, G> = &annotations[i];
                if let Annotation::Marker(m) = annotation {
                    slot += 1;
                    sink.submit(Renderable::Label(DeclutteredLabel::new(
                        slot,
                        m,
                        region.rect(),
                        style,
                    )));
                    stats.labels += 1;
                    stats.emitted += 1;
                }
            }
        }
    }
}

/// Keeps the first annotation of each overlapping group and drops the rest.
///
/// Regions are the annotations' own bounds; nothing is restyled. This matches
/// the placemark filter's treatment of generic shapes, applied to markers too.
#[derive(Clone, Debug)]
pub struct BasicFilter {
    regions: RegionSet,
}

impl Default for BasicFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicFilter {
    /// Create a filter.
    pub fn new() -> Self {
        Self {
            regions: RegionSet::with_capture_scale(1.0),
        }
    }

    /// Whether no pass state is held.
    pub fn is_idle(&self) -> bool {
        self.regions.is_empty()
    }
}

impl ClutterFilter for BasicFilter {
    fn apply<'a, F, M, G, S>(
        &mut self,
        frame: &F,
        annotations: &'a [Annotation<M, G>],
        sink: &mut S,
    ) -> PassStats
    where
        F: ?Sized,
        M: PointMarker<F>,
        G: Declutterable<F>,
        S: OrderedSink<Renderable<'a, M, G>> + ?Sized,
    {
        let mut regions = PassScope(&mut self.regions);
        let mut stats = PassStats {
            annotations: annotations.len(),
            ..PassStats::default()
        };
        stats.dropped = regions.collect(frame, annotations);
        stats.regions = regions.len();

        for (_, region) in regions.iter() {
            let Some((&first, rest)) = region.members().split_first() else {
                continue;
            };
            let annotation: &'a Annotation<M, G> = &annotations[first];
            sink.submit(match annotation {
                Annotation::Marker(m) => Renderable::Marker(m),
                Annotation::Generic(g) => Renderable::Generic(g),
            });
            stats.emitted += 1;
            stats.dropped += rest.len();
        }
        log::debug!(
            "basic pass: {} annotations, {} regions, {} emitted, {} dropped",
            stats.annotations,
            stats.regions,
            stats.emitted,
            stats.dropped
        );
        stats
    }
}
