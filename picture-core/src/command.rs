//! Draw operations - the building blocks of recorded pictures.

use serde::{Deserialize, Serialize};

use crate::geometry::{Matrix, Point, Rect};
use crate::paint::Paint;
use crate::shape::Shape;
use crate::surface::Surface;

/// A handle to an externally managed image.
///
/// The core replays drawing intents and never decodes pixels, so images
/// travel as references plus intrinsic dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image source URI or identifier.
    pub source: String,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

/// The kind of a draw operation, without its payload.
///
/// Used as the aggregation key for per-kind timing summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Push the transform/clip state.
    Save,
    /// Pop the transform/clip state.
    Restore,
    /// Concatenate a transform.
    Concat,
    /// Intersect the clip with a rectangle.
    ClipRect,
    /// Intersect the clip with a shape.
    ClipShape,
    /// Fill or stroke a rectangle.
    DrawRect,
    /// Fill or stroke an oval.
    DrawOval,
    /// Fill or stroke a shape.
    DrawShape,
    /// Draw an image into a destination rectangle.
    DrawImage,
    /// Draw a run of text.
    DrawText,
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Save => "Save",
            Self::Restore => "Restore",
            Self::Concat => "Concat",
            Self::ClipRect => "ClipRect",
            Self::ClipShape => "ClipShape",
            Self::DrawRect => "DrawRect",
            Self::DrawOval => "DrawOval",
            Self::DrawShape => "DrawShape",
            Self::DrawImage => "DrawImage",
            Self::DrawText => "DrawText",
        };
        f.write_str(name)
    }
}

/// One recorded drawing operation.
///
/// A closed tagged variant: replay, hit-testing, and text formatting are
/// exhaustive matches over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data")]
pub enum DrawOp {
    /// Push the current transform/clip state.
    Save,

    /// Pop back to the most recent saved state.
    Restore,

    /// Concatenate a transform onto the current matrix.
    Concat {
        /// Transform to apply.
        matrix: Matrix,
    },

    /// Intersect the current clip with a rectangle.
    ClipRect {
        /// Clip rectangle in local coordinates.
        rect: Rect,
    },

    /// Intersect the current clip with a shape.
    ClipShape {
        /// Clip shape in local coordinates.
        shape: Shape,
    },

    /// Fill or stroke a rectangle.
    DrawRect {
        /// Rectangle in local coordinates.
        rect: Rect,
        /// Paint state.
        paint: Paint,
    },

    /// Fill or stroke an oval inscribed in a rectangle.
    DrawOval {
        /// Bounding rectangle of the oval.
        oval: Rect,
        /// Paint state.
        paint: Paint,
    },

    /// Fill or stroke a shape.
    DrawShape {
        /// Shape in local coordinates.
        shape: Shape,
        /// Paint state.
        paint: Paint,
    },

    /// Draw an image scaled into a destination rectangle.
    DrawImage {
        /// Image handle.
        image: ImageRef,
        /// Destination rectangle in local coordinates.
        dst: Rect,
        /// Paint state (filter quality applies here).
        paint: Paint,
    },

    /// Draw a run of text.
    DrawText {
        /// Text content.
        text: String,
        /// Baseline origin in local coordinates.
        origin: Point,
        /// Font size in pixels.
        size: f32,
        /// Paint state.
        paint: Paint,
    },
}

impl DrawOp {
    /// The kind of this operation.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Save => CommandKind::Save,
            Self::Restore => CommandKind::Restore,
            Self::Concat { .. } => CommandKind::Concat,
            Self::ClipRect { .. } => CommandKind::ClipRect,
            Self::ClipShape { .. } => CommandKind::ClipShape,
            Self::DrawRect { .. } => CommandKind::DrawRect,
            Self::DrawOval { .. } => CommandKind::DrawOval,
            Self::DrawShape { .. } => CommandKind::DrawShape,
            Self::DrawImage { .. } => CommandKind::DrawImage,
            Self::DrawText { .. } => CommandKind::DrawText,
        }
    }

    /// Local-space bounds of the operation's geometry.
    ///
    /// State operations (save/restore/concat/clip) return `None`.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Save | Self::Restore | Self::Concat { .. } | Self::ClipRect { .. } | Self::ClipShape { .. } => None,
            Self::DrawRect { rect, .. } => Some(*rect),
            Self::DrawOval { oval, .. } => Some(*oval),
            Self::DrawShape { shape, .. } => Some(shape.bounds()),
            Self::DrawImage { dst, .. } => Some(*dst),
            Self::DrawText { text, origin, size, .. } => Some(text_bounds(text, *origin, *size)),
        }
    }

    /// The paint attached to the operation, if any.
    #[must_use]
    pub fn paint(&self) -> Option<&Paint> {
        match self {
            Self::Save | Self::Restore | Self::Concat { .. } | Self::ClipRect { .. } | Self::ClipShape { .. } => None,
            Self::DrawRect { paint, .. }
            | Self::DrawOval { paint, .. }
            | Self::DrawShape { paint, .. }
            | Self::DrawImage { paint, .. }
            | Self::DrawText { paint, .. } => Some(paint),
        }
    }

    /// Mutable access to the paint attached to the operation, if any.
    ///
    /// Replay-time rewrites (overdraw visualization, filter overrides)
    /// operate on cloned operations through this.
    #[must_use]
    pub fn paint_mut(&mut self) -> Option<&mut Paint> {
        match self {
            Self::Save | Self::Restore | Self::Concat { .. } | Self::ClipRect { .. } | Self::ClipShape { .. } => None,
            Self::DrawRect { paint, .. }
            | Self::DrawOval { paint, .. }
            | Self::DrawShape { paint, .. }
            | Self::DrawImage { paint, .. }
            | Self::DrawText { paint, .. } => Some(paint),
        }
    }

    /// Whether this operation produces visible output (as opposed to
    /// mutating transform/clip state).
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.paint().is_some()
    }

    /// Issue this operation onto a surface.
    pub fn execute(&self, surface: &mut dyn Surface) {
        match self {
            Self::Save => surface.save(),
            Self::Restore => surface.restore(),
            Self::Concat { matrix } => surface.concat(matrix),
            Self::ClipRect { rect } => surface.clip_rect(rect),
            Self::ClipShape { shape } => surface.clip_shape(shape),
            Self::DrawRect { rect, paint } => surface.draw_rect(rect, paint),
            Self::DrawOval { oval, paint } => surface.draw_oval(oval, paint),
            Self::DrawShape { shape, paint } => surface.draw_shape(shape, paint),
            Self::DrawImage { image, dst, paint } => surface.draw_image(image, dst, paint),
            Self::DrawText {
                text,
                origin,
                size,
                paint,
            } => surface.draw_text(text, *origin, *size, paint),
        }
    }
}

/// Approximate bounds for a text run.
///
/// The core does no shaping; 0.6 em per character is the usual estimate
/// for proportional latin text.
#[allow(clippy::cast_precision_loss)]
fn text_bounds(text: &str, origin: Point, size: f32) -> Rect {
    let advance = size * 0.6 * text.chars().count() as f32;
    Rect::from_xywh(origin.x, origin.y - size, advance, size * 1.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn test_kind_and_draw_classification() {
        let op = DrawOp::DrawRect {
            rect: Rect::from_xywh(0.0, 0.0, 1.0, 1.0),
            paint: Paint::fill(Color::BLACK),
        };
        assert_eq!(op.kind(), CommandKind::DrawRect);
        assert!(op.is_draw());

        let clip = DrawOp::ClipRect {
            rect: Rect::from_xywh(0.0, 0.0, 1.0, 1.0),
        };
        assert_eq!(clip.kind(), CommandKind::ClipRect);
        assert!(!clip.is_draw());
        assert!(clip.bounds().is_none());
    }

    #[test]
    fn test_text_bounds_cover_origin_run() {
        let op = DrawOp::DrawText {
            text: "hello".to_string(),
            origin: Point::new(10.0, 50.0),
            size: 10.0,
            paint: Paint::fill(Color::BLACK),
        };
        let bounds = op.bounds().expect("text has bounds");
        assert!(bounds.contains(Point::new(12.0, 45.0)));
        assert!(!bounds.contains(Point::new(200.0, 45.0)));
    }

    #[test]
    fn test_serde_round_trip() {
        let op = DrawOp::Concat {
            matrix: Matrix::translation(3.0, 4.0),
        };
        let json = serde_json::to_string(&op).expect("serialize");
        let back: DrawOp = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, op);
    }
}
