// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Whether two rectangles share interior area.
///
/// Rectangles that only touch along an edge or corner do not overlap, and a
/// rectangle with zero or negative width or height overlaps nothing.
#[inline]
pub(crate) fn overlaps_strictly(a: Rect, b: Rect) -> bool {
    if a.width() <= 0.0 || a.height() <= 0.0 || b.width() <= 0.0 || b.height() <= 0.0 {
        return false;
    }
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Whether every coordinate of the rectangle is finite.
#[inline]
pub(crate) fn is_finite_rect(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}
