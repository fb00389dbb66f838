//! Recorded pictures and the recorder that produces them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::command::{DrawOp, ImageRef};
use crate::error::{PictureError, PictureResult};
use crate::geometry::{Matrix, Point, Rect};
use crate::paint::Paint;
use crate::shape::Shape;
use crate::surface::Surface;

/// Unique identifier for a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PictureId(Uuid);

impl PictureId {
    /// Create a new unique picture ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PictureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PictureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable recording of a sequence of drawing operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    /// Unique identifier.
    id: PictureId,
    /// Conservative bounds of the recorded content.
    cull_rect: Rect,
    /// Recorded operations, in call order.
    ops: Vec<DrawOp>,
    /// Byte offsets into the original serialized form, one per op.
    ///
    /// `None` for pictures recorded in-process.
    offsets: Option<Vec<u64>>,
}

impl Picture {
    /// Create a picture from a sequence of operations.
    #[must_use]
    pub fn from_ops(cull_rect: Rect, ops: Vec<DrawOp>) -> Self {
        Self {
            id: PictureId::new(),
            cull_rect,
            ops,
            offsets: None,
        }
    }

    /// Attach per-operation byte offsets into the original serialized form.
    ///
    /// # Errors
    ///
    /// Returns [`PictureError::OffsetCount`] when the offset count does not
    /// match the operation count.
    pub fn with_offsets(mut self, offsets: Vec<u64>) -> PictureResult<Self> {
        if offsets.len() != self.ops.len() {
            return Err(PictureError::OffsetCount {
                ops: self.ops.len(),
                offsets: offsets.len(),
            });
        }
        self.offsets = Some(offsets);
        Ok(self)
    }

    /// The picture's unique identifier.
    #[must_use]
    pub fn id(&self) -> PictureId {
        self.id
    }

    /// Conservative bounds of the recorded content.
    #[must_use]
    pub fn cull_rect(&self) -> Rect {
        self.cull_rect
    }

    /// The recorded operations, in call order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Byte offsets into the original serialized form, when known.
    #[must_use]
    pub fn offsets(&self) -> Option<&[u64]> {
        self.offsets.as_deref()
    }

    /// Number of recorded operations.
    #[must_use]
    pub fn size(&self) -> usize {
        self.ops.len()
    }

    /// Whether the picture records no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Re-issue every recorded operation, in order, onto a surface.
    pub fn playback(&self, surface: &mut dyn Surface) {
        tracing::trace!("Picture {} playback: {} ops", self.id, self.ops.len());
        for op in &self.ops {
            op.execute(surface);
        }
    }

    /// Serialize the picture to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PictureResult<String> {
        serde_json::to_string(self).map_err(PictureError::Serialization)
    }

    /// Deserialize a picture from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> PictureResult<Self> {
        serde_json::from_str(json).map_err(PictureError::Serialization)
    }
}

/// A surface that records the operations issued to it.
///
/// Finish recording with [`PictureRecorder::finish`] to obtain a
/// [`Picture`].
#[derive(Debug, Default)]
pub struct PictureRecorder {
    ops: Vec<DrawOp>,
}

impl PictureRecorder {
    /// Create a new, empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations recorded so far, in call order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Stop recording and produce a picture with the given cull bounds.
    #[must_use]
    pub fn finish(self, cull_rect: Rect) -> Picture {
        tracing::debug!("Recorded picture with {} ops", self.ops.len());
        Picture::from_ops(cull_rect, self.ops)
    }
}

impl Surface for PictureRecorder {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn concat(&mut self, matrix: &Matrix) {
        self.ops.push(DrawOp::Concat { matrix: *matrix });
    }

    fn clip_rect(&mut self, rect: &Rect) {
        self.ops.push(DrawOp::ClipRect { rect: *rect });
    }

    fn clip_shape(&mut self, shape: &Shape) {
        self.ops.push(DrawOp::ClipShape {
            shape: shape.clone(),
        });
    }

    fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        self.ops.push(DrawOp::DrawRect {
            rect: *rect,
            paint: *paint,
        });
    }

    fn draw_oval(&mut self, oval: &Rect, paint: &Paint) {
        self.ops.push(DrawOp::DrawOval {
            oval: *oval,
            paint: *paint,
        });
    }

    fn draw_shape(&mut self, shape: &Shape, paint: &Paint) {
        self.ops.push(DrawOp::DrawShape {
            shape: shape.clone(),
            paint: *paint,
        });
    }

    fn draw_image(&mut self, image: &ImageRef, dst: &Rect, paint: &Paint) {
        self.ops.push(DrawOp::DrawImage {
            image: image.clone(),
            dst: *dst,
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, size: f32, paint: &Paint) {
        self.ops.push(DrawOp::DrawText {
            text: text.to_string(),
            origin,
            size,
            paint: *paint,
        });
    }
}
