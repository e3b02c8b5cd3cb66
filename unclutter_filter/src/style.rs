// Copyright 2025 the Unclutter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styling for decluttered labels and their leader lines.

use kurbo::Vec2;

/// An 8-bit-per-channel, non-premultiplied RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; 255 is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a color from its four channels.
    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Reasons a [`LabelStyle`] is rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StyleError {
    /// The leader line width is NaN, infinite, or negative.
    #[error("leader line width must be finite and non-negative, got {0}")]
    LeaderWidth(f64),
    /// The outline offset has a NaN or infinite component.
    #[error("outline offset must be finite, got ({0}, {1})")]
    OutlineOffset(f64, f64),
}

/// Colors and metrics used to draw a decluttered label.
///
/// The label text is drawn twice: once in [`outline`](Self::outline) shifted
/// by [`outline_offset`](Self::outline_offset), then in [`fill`](Self::fill)
/// at the layout position. Offsets are in y-down screen pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LabelStyle {
    /// Color of the offset copy of the text drawn underneath.
    pub outline: Rgba8,
    /// Color of the text itself.
    pub fill: Rgba8,
    /// Color of the leader line from the marker's anchor to its label.
    pub leader: Rgba8,
    /// Leader line width in pixels.
    pub leader_width: f64,
    /// Offset of the outline copy relative to the fill copy.
    pub outline_offset: Vec2,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            outline: Rgba8::BLACK,
            fill: Rgba8::WHITE,
            leader: Rgba8::WHITE,
            leader_width: 1.0,
            outline_offset: Vec2::new(1.0, 1.0),
        }
    }
}

impl LabelStyle {
    /// Check that every metric is usable for drawing.
    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.leader_width.is_finite() || self.leader_width < 0.0 {
            return Err(StyleError::LeaderWidth(self.leader_width));
        }
        let Vec2 { x, y } = self.outline_offset;
        if !x.is_finite() || !y.is_finite() {
            return Err(StyleError::OutlineOffset(x, y));
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_fills_in_defaults() {
        let style: LabelStyle = serde_json::from_str(r#"{ "leader_width": 2.5 }"#).unwrap();
        assert_eq!(
            style,
            LabelStyle {
                leader_width: 2.5,
                ..LabelStyle::default()
            }
        );

        let style: LabelStyle =
            serde_json::from_str(r#"{ "fill": { "r": 255, "g": 200, "b": 0, "a": 255 } }"#)
                .unwrap();
        assert_eq!(style.fill, Rgba8::new(255, 200, 0, 255));
        assert_eq!(style.outline, LabelStyle::default().outline);
        assert_eq!(style.outline_offset, LabelStyle::default().outline_offset);

        let empty: LabelStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LabelStyle::default());
    }

    #[test]
    fn style_survives_a_config_file() {
        let style = LabelStyle {
            leader: Rgba8::new(10, 20, 30, 128),
            outline_offset: Vec2::new(-1.0, 2.0),
            ..LabelStyle::default()
        };
        let text = serde_json::to_string(&style).unwrap();
        let back: LabelStyle = serde_json::from_str(&text).unwrap();
        assert_eq!(back, style);
        assert_eq!(back.validate(), Ok(()));
    }
}
