// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass grouping of annotations into screen regions.
//!
//! Regions are discovered by first intersection: each annotation joins the
//! first existing region its bounds overlap, or opens a new one. A region's
//! rectangle is fixed when it is created; it never grows to cover later
//! members and never merges with another region. Two annotations that would
//! only be connected through a region discovered later therefore stay apart.

use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::annotation::Declutterable;
use crate::util::{is_finite_rect, overlaps_strictly};

/// Capture scale used by the placemark filter.
///
/// A region opened for bounds `(x, y, w, h)` covers `(x - w/2, y - h/2, 2w, 2h)`,
/// so it also absorbs near neighbours and the labels the filter itself draws.
pub const PLACEMARK_CAPTURE_SCALE: f64 = 2.0;

/// Handle of a region within one [`RegionSet`] pass.
///
/// Handles are plain arena indices. They are only meaningful until the set is
/// cleared; structurally equal rectangles from different regions or passes
/// always have distinct handles within their pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(u32);

impl RegionId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Region handles are intentionally 32-bit; a frame never holds 2^32 regions."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A screen rectangle and the annotations captured by it, in input order.
#[derive(Clone, Debug)]
pub struct Region {
    rect: Rect,
    // Indices into the annotation slice of the current pass.
    members: SmallVec<[usize; 4]>,
}

impl Region {
    /// The capture rectangle fixed at creation.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Indices of the member annotations, in the order they joined.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }
}

/// Outcome of placing one annotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Appended to an existing region.
    Joined(RegionId),
    /// Opened a new region.
    Created(RegionId),
    /// Absent or non-finite bounds; skipped for this pass.
    Dropped,
}

/// Arena of the regions discovered during one filter pass.
///
/// The set keeps its allocations between passes but no contents: callers
/// [`clear`](Self::clear) it when the pass ends.
#[derive(Clone, Debug)]
pub struct RegionSet {
    regions: Vec<Region>,
    capture_scale: f64,
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSet {
    /// Create an empty set using [`PLACEMARK_CAPTURE_SCALE`].
    pub fn new() -> Self {
        Self::with_capture_scale(PLACEMARK_CAPTURE_SCALE)
    }

    /// Create an empty set whose new regions are `scale` times the size of
    /// the bounds that opened them, around the same center.
    ///
    /// A NaN, infinite, zero or negative `scale` is replaced by `1.0`, so that
    /// regions cover exactly the bounds that opened them.
    pub fn with_capture_scale(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!("unusable capture scale {scale}; using 1.0");
            1.0
        };
        Self {
            regions: Vec::new(),
            capture_scale: scale,
        }
    }

    /// The scale applied to bounds that open a region.
    pub fn capture_scale(&self) -> f64 {
        self.capture_scale
    }

    /// Scale `bounds` about its center by `scale` in both dimensions.
    ///
    /// With a scale of 2 the result is `(x - 0.5w, y - 0.5h, 2w, 2h)`.
    pub fn capture_rect(bounds: Rect, scale: f64) -> Rect {
        let w = bounds.width();
        let h = bounds.height();
        let grow = 0.5 * (scale - 1.0);
        let x = bounds.x0 - grow * w;
        let y = bounds.y0 - grow * h;
        Rect::new(x, y, x + scale * w, y + scale * h)
    }

    /// The first region, in creation order, whose rectangle overlaps `rect`.
    pub fn find_intersecting(&self, rect: Rect) -> Option<RegionId> {
        self.regions
            .iter()
            .position(|r| overlaps_strictly(rect, r.rect))
            .map(RegionId::new)
    }

    /// Place the annotation at index `member` given its bounds for this pass.
    pub fn insert(&mut self, bounds: Option<Rect>, member: usize) -> Placement {
        let Some(bounds) = bounds.filter(|b| is_finite_rect(*b)) else {
            return Placement::Dropped;
        };
        if let Some(id) = self.find_intersecting(bounds) {
            self.regions[id.idx()].members.push(member);
            return Placement::Joined(id);
        }
        let id = RegionId::new(self.regions.len());
        let mut members = SmallVec::new();
        members.push(member);
        self.regions.push(Region {
            rect: Self::capture_rect(bounds, self.capture_scale),
            members,
        });
        Placement::Created(id)
    }

    /// Group `annotations` into regions, in input order.
    ///
    /// Member indices refer to positions in `annotations`. Returns the number
    /// of annotations dropped for having no usable bounds.
    pub fn collect<F, A>(&mut self, frame: &F, annotations: &[A]) -> usize
    where
        F: ?Sized,
        A: Declutterable<F>,
    {
        let mut dropped = 0;
        for (i, annotation) in annotations.iter().enumerate() {
            match self.insert(annotation.bounds(frame), i) {
                Placement::Joined(id) => log::trace!("annotation {i} joined region {}", id.0),
                Placement::Created(id) => log::trace!("annotation {i} opened region {}", id.0),
                Placement::Dropped => {
                    dropped += 1;
                    log::trace!("annotation {i} has no usable bounds; dropped");
                }
            }
        }
        dropped
    }

    /// Look up a region by handle.
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.idx())
    }

    /// Iterate regions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> + '_ {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (RegionId::new(i), r))
    }

    /// Number of regions in the current pass.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the current pass has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Drop every region and membership, keeping the allocation.
    pub fn clear(&mut self) {
        self.regions.clear();
    }
}
