//! Paint state attached to draw operations.

use serde::{Deserialize, Serialize};

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// How geometry is composited over what is already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Source over destination (the default).
    SrcOver,
    /// Additive accumulation.
    Plus,
    /// Multiply source and destination.
    Multiply,
    /// Inverse-multiply source and destination.
    Screen,
}

/// Sampling quality for image draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterQuality {
    /// Nearest-neighbor sampling.
    None,
    /// Bilinear sampling.
    Low,
    /// Bilinear with mipmaps.
    Medium,
    /// Bicubic sampling.
    High,
}

/// Whether geometry is filled or stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintStyle {
    /// Fill the interior.
    Fill,
    /// Stroke the outline.
    Stroke,
}

/// Paint state for one draw operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// Color to draw with.
    pub color: Color,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Stroke width in pixels (ignored when filling).
    pub stroke_width: f32,
    /// Compositing mode.
    pub blend: BlendMode,
    /// Image sampling quality.
    pub filter: FilterQuality,
}

impl Paint {
    /// Create a fill paint with the given color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            blend: BlendMode::SrcOver,
            filter: FilterQuality::Low,
        }
    }

    /// Create a stroke paint with the given color and width.
    #[must_use]
    pub const fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            blend: BlendMode::SrcOver,
            filter: FilterQuality::Low,
        }
    }

    /// Set the blend mode.
    #[must_use]
    pub const fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Set the image sampling quality.
    #[must_use]
    pub const fn with_filter(mut self, filter: FilterQuality) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::fill(Color::BLACK)
    }
}
