// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unclutter_filter --heading-base-level=0

//! Unclutter Filter: per-frame screen-space decluttering of point annotations.
//!
//! When many annotations projected from a 3D scene land on top of each other,
//! a clutter filter decides which ones keep their full representation and
//! which collapse into a compact stack of text labels, each with a leader line
//! back to its true screen position.
//!
//! - Groups annotations into regions by first intersection of their screen bounds.
//! - Keeps lone markers and the first generic shape of each region untouched.
//! - Replaces crowded point markers with [`DeclutteredLabel`]s fanned out beside
//!   the region center.
//! - Submits everything to an [`OrderedSink`], which owns depth sorting and drawing.
//!
//! Nothing survives a pass: regions are rebuilt every frame and cleared before
//! [`ClutterFilter::apply`] returns, even if a sink panics.
//!
//! ## Not a projector, not a renderer
//!
//! The filter consumes screen-space bounds and eye distances the host has
//! already computed. Projection, text shaping, icon drawing and picking all
//! stay behind the [`Declutterable`], [`PointMarker`] and [`LabelSurface`]
//! traits, implemented by the host for its own frame type. It resolves 2D
//! overlap only; depth occlusion is left to the host's draw order.
//!
//! ## API overview
//!
//! - [`Declutterable`] / [`PointMarker`] / [`EyeDistance`]: the capability an annotation exposes.
//! - [`Annotation`]: tags each input as a point marker or a generic shape.
//! - [`PlacemarkFilter`]: stacks crowded markers into labels.
//! - [`BasicFilter`]: keeps the first annotation of each overlapping group.
//! - [`Renderable`]: one emitted item: an unchanged input or a [`DeclutteredLabel`].
//! - [`RegionSet`]: the per-pass region arena, usable on its own.
//! - [`LabelLayout`]: label placement and leader line geometry.
//! - [`LabelStyle`]: colors and metrics for labels.
//! - [`EyeSortedSink`]: a minimal back-to-front sink with nearest-first picking.
//!
//! ## Logging
//!
//! Decisions are reported through the [`log`] facade: per-annotation placement
//! at `trace`, discarded shapes and a per-pass summary at `debug`. Install any
//! `log` backend to see them.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` support in `kurbo`.
//! - `libm`: float math for `no_std` targets via `kurbo/libm`.
//! - `serde`: `Serialize`/`Deserialize` for [`LabelStyle`] and [`Rgba8`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod annotation;
mod filter;
mod label;
mod leader;
mod region;
mod render;
mod sink;
mod style;
pub(crate) mod util;

#[cfg(test)]
mod testing;

pub use annotation::{Annotation, Declutterable, EyeDistance, PointMarker};
pub use filter::{BasicFilter, ClutterFilter, PassStats, PlacemarkFilter};
pub use label::DeclutteredLabel;
pub use leader::{LabelLayout, closer_endpoint};
pub use region::{PLACEMARK_CAPTURE_SCALE, Placement, Region, RegionId, RegionSet};
pub use render::{LabelSurface, Renderable};
pub use sink::{EyeSortedSink, OrderedSink};
pub use style::{LabelStyle, Rgba8, StyleError};
