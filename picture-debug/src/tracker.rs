//! A state-only surface that tracks transform and clip without pixels.

use serde::{Deserialize, Serialize};

use picture_core::{CommandKind, ImageRef, Matrix, Paint, Point, Rect, Shape, Surface};

/// One applied clip, as recorded in the clip history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipEntry {
    /// Which clip operation produced the entry.
    pub kind: CommandKind,
    /// The clip geometry's bounds mapped to device space.
    pub device_rect: Rect,
    /// Number of enclosing saves when the clip was applied.
    pub depth: usize,
}

/// Cumulative rendering state at a point in the command sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Cumulative transform matrix.
    pub matrix: Matrix,
    /// Flattened device-space clip.
    pub clip: Rect,
    /// Clip history, innermost last, still nested by save depth.
    pub clip_stack: Vec<ClipEntry>,
}

/// A [`Surface`] that executes state operations and ignores draws.
///
/// Drives `state_at`, hit-testing, and the replay overlays; draw calls are
/// deliberately no-ops so tracking a prefix costs one linear pass.
#[derive(Debug, Clone)]
pub struct StateTracker {
    matrix: Matrix,
    clip: Rect,
    saved: Vec<(Matrix, Rect, usize)>,
    clip_entries: Vec<ClipEntry>,
}

impl StateTracker {
    /// Create a tracker with an initial device clip.
    #[must_use]
    pub fn new(initial_clip: Rect) -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            clip: initial_clip,
            saved: Vec::new(),
            clip_entries: Vec::new(),
        }
    }

    /// Current cumulative transform.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        self.matrix
    }

    /// Current flattened device clip.
    #[must_use]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Number of outstanding saves.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Snapshot the current state.
    #[must_use]
    pub fn state(&self) -> RenderState {
        RenderState {
            matrix: self.matrix,
            clip: self.clip,
            clip_stack: self.clip_entries.clone(),
        }
    }

    fn apply_clip(&mut self, kind: CommandKind, local_bounds: Rect) {
        let device_rect = self.matrix.map_rect(&local_bounds);
        self.clip = self.clip.intersect(&device_rect).unwrap_or(Rect::EMPTY);
        self.clip_entries.push(ClipEntry {
            kind,
            device_rect,
            depth: self.saved.len(),
        });
    }
}

impl Surface for StateTracker {
    fn save(&mut self) {
        self.saved
            .push((self.matrix, self.clip, self.clip_entries.len()));
    }

    fn restore(&mut self) {
        if let Some((matrix, clip, entries)) = self.saved.pop() {
            self.matrix = matrix;
            self.clip = clip;
            self.clip_entries.truncate(entries);
        }
    }

    fn concat(&mut self, matrix: &Matrix) {
        self.matrix = self.matrix.concat(matrix);
    }

    fn clip_rect(&mut self, rect: &Rect) {
        self.apply_clip(CommandKind::ClipRect, *rect);
    }

    fn clip_shape(&mut self, shape: &Shape) {
        self.apply_clip(CommandKind::ClipShape, shape.bounds());
    }

    fn draw_rect(&mut self, _rect: &Rect, _paint: &Paint) {}

    fn draw_oval(&mut self, _oval: &Rect, _paint: &Paint) {}

    fn draw_shape(&mut self, _shape: &Shape, _paint: &Paint) {}

    fn draw_image(&mut self, _image: &ImageRef, _dst: &Rect, _paint: &Paint) {}

    fn draw_text(&mut self, _text: &str, _origin: Point, _size: f32, _paint: &Paint) {}
}
