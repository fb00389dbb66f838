//! The command log: an ordered, replayable store of draw commands.
//!
//! A [`DebugCanvas`] is built by decomposing a picture into one
//! [`DrawCommand`] per intercepted operation. Replay executes a prefix of
//! the log onto any [`Surface`], honoring per-command visibility and the
//! canvas's render-mode toggles; the same traversal drives state queries
//! and hit-testing so they can never disagree with what replay draws.

use std::time::Instant;

use picture_core::{
    BlendMode, Color, DrawOp, FilterQuality, Matrix, Paint, Picture, PictureRecorder, Point, Rect,
    Shape, Surface,
};

use crate::command::DrawCommand;
use crate::error::{DebugError, DebugResult};
use crate::tracker::{RenderState, StateTracker};

/// Color substituted for every draw under overdraw visualization; the
/// additive blend makes repeated coverage progressively brighter.
const OVERDRAW_COLOR: Color = Color::rgba(250, 62, 62, 80);

/// Color substituted for the current command when the highlight filter is
/// on.
const HIGHLIGHT_COLOR: Color = Color::rgba(255, 160, 0, 160);

/// Paint for clip outlines drawn in mega visualization mode.
const MEGA_CLIP_PAINT: Paint = Paint::stroke(Color::rgba(66, 133, 244, 255), 2.0);

/// An ordered, indexable store of draw commands decomposed from a picture.
///
/// The command sequence is frozen in length after construction; only
/// per-command visibility flags and timing samples mutate. Render-mode
/// flags are per-instance, so independent canvases never interfere.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct DebugCanvas {
    commands: Vec<DrawCommand>,
    width: u32,
    height: u32,
    user_matrix: Matrix,
    overdraw_viz: bool,
    allow_simplify_clip: bool,
    mega_viz: bool,
    tex_filter_override: Option<FilterQuality>,
    highlight_filter: bool,
}

impl DebugCanvas {
    /// Create an empty canvas with the given window size.
    #[must_use]
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            width,
            height,
            user_matrix: Matrix::IDENTITY,
            overdraw_viz: false,
            allow_simplify_clip: false,
            mega_viz: false,
            tex_filter_override: None,
            highlight_filter: false,
        }
    }

    /// Decompose a picture into a command log.
    ///
    /// The picture's operations are intercepted by playing it back through
    /// a recording surface; each intercepted operation becomes one command,
    /// in call order.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::InvalidPicture`] when a restore has no
    /// matching save, or when the picture's source offsets do not line up
    /// with its operations. Unmatched trailing saves are legal; replay
    /// balances them.
    pub fn from_picture(picture: &Picture, width: u32, height: u32) -> DebugResult<Self> {
        let mut recorder = PictureRecorder::new();
        picture.playback(&mut recorder);
        let ops = recorder.ops().to_vec();

        if let Some(offsets) = picture.offsets() {
            if offsets.len() != ops.len() {
                return Err(DebugError::InvalidPicture(format!(
                    "{} source offsets for {} operations",
                    offsets.len(),
                    ops.len()
                )));
            }
        }

        let mut depth = 0usize;
        for (i, op) in ops.iter().enumerate() {
            match op {
                DrawOp::Save => depth += 1,
                DrawOp::Restore => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        DebugError::InvalidPicture(format!(
                            "restore without matching save at command {i}"
                        ))
                    })?;
                }
                _ => {}
            }
        }
        if depth > 0 {
            tracing::debug!("Picture leaves {depth} saves outstanding");
        }

        let commands: Vec<DrawCommand> = ops
            .into_iter()
            .enumerate()
            .map(|(i, op)| DrawCommand::new(op, picture.offsets().map(|offsets| offsets[i])))
            .collect();
        tracing::info!(
            "Decomposed picture {} into {} commands",
            picture.id(),
            commands.len()
        );

        let mut canvas = Self::empty(width, height);
        canvas.commands = commands;
        Ok(canvas)
    }

    /// Number of commands in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the log holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands, in replay order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The command at an index.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] beyond the log.
    pub fn command(&self, index: usize) -> DebugResult<&DrawCommand> {
        self.commands
            .get(index)
            .ok_or(DebugError::IndexOutOfRange {
                index,
                len: self.commands.len(),
            })
    }

    /// Whether the command at an index contributes to replay.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] beyond the log.
    pub fn is_visible(&self, index: usize) -> DebugResult<bool> {
        self.command(index).map(DrawCommand::is_visible)
    }

    /// Toggle a single command's visibility; no other command is affected.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] beyond the log; nothing
    /// mutates on failure.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> DebugResult<()> {
        let len = self.commands.len();
        let command = self
            .commands
            .get_mut(index)
            .ok_or(DebugError::IndexOutOfRange { index, len })?;
        command.set_visible(visible);
        tracing::debug!("Command {index} visibility set to {visible}");
        Ok(())
    }

    /// Record a timing sample for the command at an index.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] beyond the log.
    pub fn push_timing(&mut self, index: usize, elapsed_ms: f64) -> DebugResult<()> {
        let len = self.commands.len();
        self.commands
            .get_mut(index)
            .ok_or(DebugError::IndexOutOfRange { index, len })?
            .push_timing(elapsed_ms);
        Ok(())
    }

    /// Window size used for the replay clip and overlays.
    #[must_use]
    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Set the window size; takes effect on the next replay.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        tracing::debug!("Debug canvas window set to {width}x{height}");
    }

    /// The user matrix applied ahead of every replayed command.
    #[must_use]
    pub fn user_matrix(&self) -> Matrix {
        self.user_matrix
    }

    /// Set the user matrix; takes effect on the next replay.
    pub fn set_user_matrix(&mut self, matrix: Matrix) {
        self.user_matrix = matrix;
    }

    /// Toggle overdraw visualization; takes effect on the next replay.
    pub fn set_overdraw_viz(&mut self, enabled: bool) {
        self.overdraw_viz = enabled;
        tracing::debug!("Overdraw visualization: {enabled}");
    }

    /// Toggle clip simplification; takes effect on the next replay.
    ///
    /// When enabled, shape clips are reduced to their bounding rectangle.
    pub fn set_allow_simplify_clip(&mut self, enabled: bool) {
        self.allow_simplify_clip = enabled;
        tracing::debug!("Clip simplification: {enabled}");
    }

    /// Toggle mega visualization mode; takes effect on the next replay.
    ///
    /// When enabled, the active clip stack is outlined over the replay.
    pub fn set_mega_viz(&mut self, enabled: bool) {
        self.mega_viz = enabled;
        tracing::debug!("Mega visualization: {enabled}");
    }

    /// Override the sampling quality of every image draw, or clear the
    /// override with `None`; takes effect on the next replay.
    pub fn set_tex_filter_override(&mut self, level: Option<FilterQuality>) {
        self.tex_filter_override = level;
        tracing::debug!("Texture filter override: {level:?}");
    }

    /// Toggle emphasis of the command at the replay boundary.
    pub fn set_highlight_filter(&mut self, enabled: bool) {
        self.highlight_filter = enabled;
    }

    /// Execute commands `[0, upto)` onto a surface.
    ///
    /// Invisible commands are skipped; active render modes rewrite the
    /// executed operations; when the highlight filter is on, the command
    /// at `upto - 1` is drawn with emphasis paint instead of its own.
    /// Output is deterministic for a fixed (commands, visibility, flags,
    /// `upto`) tuple; no state carries across calls.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] when `upto` exceeds the log.
    pub fn replay(&self, surface: &mut dyn Surface, upto: usize) -> DebugResult<()> {
        self.run(upto, Some(surface), None).map(|_| ())
    }

    /// Like [`DebugCanvas::replay`], recording each executed command's
    /// elapsed milliseconds into its timing samples. Returns the total
    /// elapsed time for the run.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] when `upto` exceeds the log.
    pub fn replay_timed(&mut self, surface: &mut dyn Surface, upto: usize) -> DebugResult<f64> {
        let start = Instant::now();
        let mut samples = Vec::new();
        self.run(upto, Some(surface), Some(&mut samples))?;
        for (index, elapsed_ms) in samples {
            self.commands[index].push_timing(elapsed_ms);
        }
        let total_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!("Timed replay of {upto} commands took {total_ms:.3}ms");
        Ok(total_ms)
    }

    /// The transform and clip in effect immediately after command
    /// `index - 1` executes.
    ///
    /// Index 0 reports the initial state: the user matrix (identity by
    /// default) and the window-sized or unbounded clip. Shares its
    /// traversal with [`DebugCanvas::replay`], so the two stay consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] when `index` exceeds the
    /// log.
    pub fn state_at(&self, index: usize) -> DebugResult<RenderState> {
        self.run(index, None, None)
    }

    /// Topmost visible command in `[0, upto)` whose device-space geometry
    /// contains `point`, honoring the clip in effect when it drew.
    ///
    /// Returns `None` when nothing hits. Last drawn wins, matching
    /// painter's-algorithm stacking.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::IndexOutOfRange`] when `upto` exceeds the log.
    pub fn hit_test(&self, point: Point, upto: usize) -> DebugResult<Option<usize>> {
        self.check_upto(upto)?;
        let mut tracker = StateTracker::new(self.initial_clip());
        if !self.user_matrix.is_identity() {
            tracker.concat(&self.user_matrix);
        }

        // Forward scan keeping the last hit: equivalent to a reverse scan
        // returning the first, without rewinding clip state.
        let mut best = None;
        for (i, command) in self.commands.iter().take(upto).enumerate() {
            if !command.is_visible() {
                continue;
            }
            let op = self.apply_render_modes(command.op());
            if matches!(op, DrawOp::Restore) && tracker.save_depth() == 0 {
                continue;
            }
            if op.is_draw() && tracker.clip().contains(point) {
                if let Some(inverse) = tracker.matrix().invert() {
                    if op_contains(&op, inverse.map_point(point)) {
                        best = Some(i);
                    }
                }
            }
            op.execute(&mut tracker);
        }
        Ok(best)
    }

    fn check_upto(&self, upto: usize) -> DebugResult<()> {
        if upto > self.commands.len() {
            return Err(DebugError::IndexOutOfRange {
                index: upto,
                len: self.commands.len(),
            });
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn window_rect(&self) -> Option<Rect> {
        (self.width > 0 && self.height > 0)
            .then(|| Rect::from_xywh(0.0, 0.0, self.width as f32, self.height as f32))
    }

    fn initial_clip(&self) -> Rect {
        self.window_rect().unwrap_or(Rect::UNBOUNDED)
    }

    /// Rewrite an operation under the active render modes.
    fn apply_render_modes(&self, op: &DrawOp) -> DrawOp {
        let mut op = op.clone();
        if self.allow_simplify_clip {
            if let DrawOp::ClipShape { shape } = &op {
                op = DrawOp::ClipRect {
                    rect: shape.bounds(),
                };
            }
        }
        if let Some(level) = self.tex_filter_override {
            if let DrawOp::DrawImage { paint, .. } = &mut op {
                paint.filter = level;
            }
        }
        if self.overdraw_viz {
            if let Some(paint) = op.paint_mut() {
                paint.color = OVERDRAW_COLOR;
                paint.blend = BlendMode::Plus;
            }
        }
        op
    }

    /// The shared traversal behind replay, timing, and state queries.
    fn run(
        &self,
        upto: usize,
        mut surface: Option<&mut dyn Surface>,
        mut samples: Option<&mut Vec<(usize, f64)>>,
    ) -> DebugResult<RenderState> {
        self.check_upto(upto)?;

        let mut tracker = StateTracker::new(self.initial_clip());
        if let Some(s) = surface.as_mut() {
            s.save();
            if let Some(window) = self.window_rect() {
                s.clip_rect(&window);
            }
        }
        if !self.user_matrix.is_identity() {
            tracker.concat(&self.user_matrix);
            if let Some(s) = surface.as_mut() {
                s.concat(&self.user_matrix);
            }
        }

        for (i, command) in self.commands.iter().take(upto).enumerate() {
            if !command.is_visible() {
                tracing::trace!("Skip hidden command {i}");
                continue;
            }
            let mut op = self.apply_render_modes(command.op());
            // Hiding a save can orphan its restore; never pop the envelope.
            if matches!(op, DrawOp::Restore) && tracker.save_depth() == 0 {
                continue;
            }
            if self.highlight_filter && i + 1 == upto && op.is_draw() {
                if let Some(paint) = op.paint_mut() {
                    paint.color = HIGHLIGHT_COLOR;
                    paint.blend = BlendMode::SrcOver;
                }
            }
            let start = samples.is_some().then(Instant::now);
            op.execute(&mut tracker);
            if let Some(s) = surface.as_mut() {
                op.execute(&mut **s);
            }
            if let (Some(start), Some(samples)) = (start, samples.as_mut()) {
                samples.push((i, start.elapsed().as_secs_f64() * 1000.0));
            }
        }

        let state = tracker.state();
        while tracker.save_depth() > 0 {
            tracker.restore();
            if let Some(s) = surface.as_mut() {
                s.restore();
            }
        }
        if let Some(s) = surface.as_mut() {
            s.restore();
        }
        // The overlay goes outside the envelope: clips applied at depth 0
        // are still active inside it and would clip their own outlines.
        if self.mega_viz {
            if let Some(s) = surface.as_mut() {
                draw_clip_overlay(&mut **s, self.window_rect(), &state);
            }
        }
        Ok(state)
    }
}

/// Outline the active clip stack in device space, above the replayed
/// content and clipped only to the window.
fn draw_clip_overlay(surface: &mut dyn Surface, window: Option<Rect>, state: &RenderState) {
    surface.save();
    if let Some(window) = window {
        surface.clip_rect(&window);
    }
    for entry in &state.clip_stack {
        surface.draw_rect(&entry.device_rect, &MEGA_CLIP_PAINT);
    }
    surface.restore();
}

fn op_contains(op: &DrawOp, local: Point) -> bool {
    match op {
        DrawOp::DrawRect { rect, .. } => rect.contains(local),
        DrawOp::DrawOval { oval, .. } => Shape::Oval(*oval).contains(local),
        DrawOp::DrawShape { shape, .. } => shape.contains(local),
        DrawOp::DrawImage { dst, .. } => dst.contains(local),
        DrawOp::DrawText { .. } => op.bounds().is_some_and(|bounds| bounds.contains(local)),
        DrawOp::Save
        | DrawOp::Restore
        | DrawOp::Concat { .. }
        | DrawOp::ClipRect { .. }
        | DrawOp::ClipShape { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picture_core::PaintStyle;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_xywh(x, y, w, h)
    }

    /// Red rect, green oval, blue rect - the worked three-command log.
    fn three_command_picture() -> Picture {
        let mut recorder = PictureRecorder::new();
        recorder.draw_rect(&rect(0.0, 0.0, 40.0, 40.0), &Paint::fill(Color::rgb(255, 0, 0)));
        recorder.draw_oval(&rect(20.0, 20.0, 40.0, 40.0), &Paint::fill(Color::rgb(0, 255, 0)));
        recorder.draw_rect(&rect(70.0, 70.0, 20.0, 20.0), &Paint::fill(Color::rgb(0, 0, 255)));
        recorder.finish(rect(0.0, 0.0, 100.0, 100.0))
    }

    fn canvas_of(picture: &Picture) -> DebugCanvas {
        DebugCanvas::from_picture(picture, 100, 100).expect("valid picture")
    }

    fn replayed_ops(canvas: &DebugCanvas, upto: usize) -> Vec<DrawOp> {
        let mut recorder = PictureRecorder::new();
        canvas.replay(&mut recorder, upto).expect("in range");
        recorder.ops().to_vec()
    }

    #[test]
    fn test_build_preserves_order_and_offsets() {
        let picture = three_command_picture();
        let ops = picture.ops().to_vec();
        let picture = Picture::from_ops(rect(0.0, 0.0, 100.0, 100.0), ops)
            .with_offsets(vec![4, 40, 76])
            .expect("offsets match");
        let canvas = canvas_of(&picture);
        assert_eq!(canvas.len(), 3);
        assert_eq!(canvas.command(1).expect("in range").source_offset(), Some(40));
    }

    #[test]
    fn test_unbalanced_restore_is_invalid() {
        let mut recorder = PictureRecorder::new();
        recorder.restore();
        let picture = recorder.finish(Rect::EMPTY);
        assert!(matches!(
            DebugCanvas::from_picture(&picture, 100, 100),
            Err(DebugError::InvalidPicture(_))
        ));
    }

    #[test]
    fn test_outstanding_saves_are_balanced() {
        let mut recorder = PictureRecorder::new();
        recorder.save();
        recorder.save();
        recorder.draw_rect(&rect(0.0, 0.0, 10.0, 10.0), &Paint::default());
        let picture = recorder.finish(Rect::EMPTY);
        let canvas = canvas_of(&picture);

        let ops = replayed_ops(&canvas, 3);
        let saves = ops.iter().filter(|op| matches!(op, DrawOp::Save)).count();
        let restores = ops.iter().filter(|op| matches!(op, DrawOp::Restore)).count();
        assert_eq!(saves, restores);
    }

    #[test]
    fn test_replay_skips_hidden_commands_only() {
        let picture = three_command_picture();
        let mut canvas = canvas_of(&picture);

        let before = replayed_ops(&canvas, 3);
        canvas.set_visible(1, false).expect("in range");
        let hidden = replayed_ops(&canvas, 3);
        assert_eq!(hidden.iter().filter(|op| op.is_draw()).count(), 2);
        assert!(!hidden.iter().any(|op| matches!(op, DrawOp::DrawOval { .. })));

        canvas.set_visible(1, true).expect("in range");
        assert_eq!(replayed_ops(&canvas, 3), before);
    }

    #[test]
    fn test_set_visible_out_of_range_is_an_error() {
        let picture = three_command_picture();
        let mut canvas = canvas_of(&picture);
        assert!(matches!(
            canvas.set_visible(3, false),
            Err(DebugError::IndexOutOfRange { index: 3, len: 3 })
        ));
        // Nothing mutated.
        assert!(canvas.commands().iter().all(DrawCommand::is_visible));
    }

    #[test]
    fn test_overdraw_rewrites_draw_paints() {
        let picture = three_command_picture();
        let mut canvas = canvas_of(&picture);
        canvas.set_overdraw_viz(true);
        for op in replayed_ops(&canvas, 3).iter().filter(|op| op.is_draw()) {
            let paint = op.paint().expect("draw op");
            assert_eq!(paint.color, OVERDRAW_COLOR);
            assert_eq!(paint.blend, BlendMode::Plus);
        }
    }

    #[test]
    fn test_tex_filter_override_touches_images_only() {
        let mut recorder = PictureRecorder::new();
        recorder.draw_image(
            &picture_core::ImageRef {
                source: "img:1".to_string(),
                width: 64,
                height: 64,
            },
            &rect(0.0, 0.0, 64.0, 64.0),
            &Paint::default(),
        );
        recorder.draw_rect(&rect(0.0, 0.0, 10.0, 10.0), &Paint::default());
        let picture = recorder.finish(Rect::EMPTY);
        let mut canvas = canvas_of(&picture);
        canvas.set_tex_filter_override(Some(FilterQuality::High));

        let ops = replayed_ops(&canvas, 2);
        let image_paint = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::DrawImage { paint, .. } => Some(*paint),
                _ => None,
            })
            .expect("image op");
        assert_eq!(image_paint.filter, FilterQuality::High);
        let rect_paint = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::DrawRect { paint, .. } => Some(*paint),
                _ => None,
            })
            .expect("rect op");
        assert_eq!(rect_paint.filter, Paint::default().filter);
    }

    #[test]
    fn test_simplify_clip_reduces_shape_clips() {
        let mut recorder = PictureRecorder::new();
        recorder.clip_shape(&Shape::Polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(10.0, 30.0),
        ]));
        let picture = recorder.finish(Rect::EMPTY);
        let mut canvas = canvas_of(&picture);
        canvas.set_allow_simplify_clip(true);

        let ops = replayed_ops(&canvas, 1);
        let expected = rect(0.0, 0.0, 20.0, 30.0);
        assert!(ops
            .iter()
            .any(|op| matches!(op, DrawOp::ClipRect { rect } if *rect == expected)));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::ClipShape { .. })));
    }

    #[test]
    fn test_highlight_replaces_boundary_paint() {
        let picture = three_command_picture();
        let mut canvas = canvas_of(&picture);
        canvas.set_highlight_filter(true);

        let ops = replayed_ops(&canvas, 2);
        let draws: Vec<&Paint> = ops.iter().filter_map(DrawOp::paint).collect();
        assert_eq!(draws[0].color, Color::rgb(255, 0, 0));
        assert_eq!(draws[1].color, HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_state_at_tracks_transform_and_clip() {
        let mut recorder = PictureRecorder::new();
        recorder.save();
        recorder.concat(&Matrix::translation(10.0, 20.0));
        recorder.clip_rect(&rect(0.0, 0.0, 50.0, 50.0));
        recorder.restore();
        let picture = recorder.finish(Rect::EMPTY);
        let canvas = canvas_of(&picture);

        let initial = canvas.state_at(0).expect("in range");
        assert!(initial.matrix.is_identity());
        assert_eq!(initial.clip, rect(0.0, 0.0, 100.0, 100.0));

        let inside = canvas.state_at(3).expect("in range");
        assert_eq!(inside.matrix, Matrix::translation(10.0, 20.0));
        assert_eq!(inside.clip, rect(10.0, 20.0, 50.0, 50.0));
        assert_eq!(inside.clip_stack.len(), 1);

        let after = canvas.state_at(4).expect("in range");
        assert!(after.matrix.is_identity());
        assert!(after.clip_stack.is_empty());
    }

    #[test]
    fn test_hit_test_last_drawn_wins() {
        let picture = three_command_picture();
        let canvas = canvas_of(&picture);
        // Inside both the first rect and the oval.
        let overlap = Point::new(35.0, 35.0);
        assert_eq!(canvas.hit_test(overlap, 2).expect("in range"), Some(1));
        assert_eq!(canvas.hit_test(overlap, 1).expect("in range"), Some(0));
        // Outside everything.
        assert_eq!(canvas.hit_test(Point::new(95.0, 5.0), 3).expect("in range"), None);
    }

    #[test]
    fn test_hit_test_honors_visibility_and_clip() {
        let mut recorder = PictureRecorder::new();
        recorder.clip_rect(&rect(0.0, 0.0, 30.0, 30.0));
        recorder.draw_rect(&rect(0.0, 0.0, 100.0, 100.0), &Paint::default());
        let picture = recorder.finish(Rect::EMPTY);
        let mut canvas = canvas_of(&picture);

        // Clipped out even though the rect geometry contains the point.
        assert_eq!(canvas.hit_test(Point::new(60.0, 60.0), 2).expect("in range"), None);
        assert_eq!(
            canvas.hit_test(Point::new(10.0, 10.0), 2).expect("in range"),
            Some(1)
        );

        canvas.set_visible(1, false).expect("in range");
        assert_eq!(canvas.hit_test(Point::new(10.0, 10.0), 2).expect("in range"), None);
    }

    #[test]
    fn test_replay_out_of_range() {
        let picture = three_command_picture();
        let canvas = canvas_of(&picture);
        let mut recorder = PictureRecorder::new();
        assert!(matches!(
            canvas.replay(&mut recorder, 4),
            Err(DebugError::IndexOutOfRange { index: 4, len: 3 })
        ));
    }

    #[test]
    fn test_replay_timed_records_samples() {
        let picture = three_command_picture();
        let mut canvas = canvas_of(&picture);
        let mut recorder = PictureRecorder::new();
        let total = canvas.replay_timed(&mut recorder, 3).expect("in range");
        assert!(total >= 0.0);
        for command in canvas.commands() {
            assert_eq!(command.timings().len(), 1);
        }
    }

    #[test]
    fn test_user_matrix_shifts_replay_state() {
        let picture = three_command_picture();
        let mut canvas = canvas_of(&picture);
        canvas.set_user_matrix(Matrix::scaling(2.0, 2.0));
        let state = canvas.state_at(0).expect("in range");
        assert_eq!(state.matrix, Matrix::scaling(2.0, 2.0));

        // The hit point must be in device space: local (35, 35) lands at
        // (70, 70) under the user matrix.
        assert_eq!(
            canvas.hit_test(Point::new(70.0, 70.0), 2).expect("in range"),
            Some(1)
        );
    }

    #[test]
    fn test_mega_viz_outlines_active_clips() {
        let mut recorder = PictureRecorder::new();
        recorder.clip_rect(&rect(5.0, 5.0, 50.0, 50.0));
        recorder.draw_rect(&rect(0.0, 0.0, 10.0, 10.0), &Paint::default());
        let picture = recorder.finish(Rect::EMPTY);
        let mut canvas = canvas_of(&picture);
        canvas.set_mega_viz(true);

        let ops = replayed_ops(&canvas, 2);
        let outline = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::DrawRect { rect, paint } if paint.style == PaintStyle::Stroke => {
                    Some(*rect)
                }
                _ => None,
            })
            .next_back();
        assert_eq!(outline, Some(rect(5.0, 5.0, 50.0, 50.0)));
    }

    #[test]
    fn test_mega_viz_overlay_escapes_command_clips() {
        let mut recorder = PictureRecorder::new();
        recorder.clip_rect(&rect(5.0, 5.0, 50.0, 50.0));
        recorder.draw_rect(&rect(0.0, 0.0, 10.0, 10.0), &Paint::default());
        let picture = recorder.finish(Rect::EMPTY);
        let mut canvas = canvas_of(&picture);
        canvas.set_mega_viz(true);

        let ops = replayed_ops(&canvas, 2);
        let envelope_close = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Restore))
            .expect("envelope restore");
        let outline = ops
            .iter()
            .position(|op| {
                matches!(op, DrawOp::DrawRect { paint, .. } if paint.style == PaintStyle::Stroke)
            })
            .expect("outline");
        // The outline is issued after the replay envelope closes, so the
        // replayed clip no longer applies to it.
        assert!(outline > envelope_close);
        let window = rect(0.0, 0.0, 100.0, 100.0);
        assert!(ops[envelope_close + 1..outline]
            .iter()
            .all(|op| !matches!(op, DrawOp::ClipRect { rect } if *rect != window)));
    }
}
