//! The debugger façade: one command log, one picture, one cursor.

use std::collections::HashMap;

use picture_core::{CommandKind, FilterQuality, Matrix, Picture, Point, Rect, Surface};

use crate::canvas::DebugCanvas;
use crate::diagnostics;
use crate::error::DebugResult;
use crate::tracker::RenderState;

/// Owns a command log and the currently loaded picture, and exposes a
/// single playback cursor over the log.
///
/// The cursor always lies in `[0, len]`; replay covers the half-open
/// prefix `[0, cursor)`. Designed for exclusive ownership by one
/// controlling thread.
#[derive(Debug)]
pub struct Debugger {
    canvas: DebugCanvas,
    picture: Option<Picture>,
    index: usize,
    profile_runs: usize,
}

impl Debugger {
    /// Create a debugger with an empty command log.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: DebugCanvas::empty(width, height),
            picture: None,
            index: 0,
            profile_runs: 0,
        }
    }

    /// Load a picture, replacing any previous picture and command log.
    ///
    /// The cursor lands at the full log length so the fresh picture is
    /// immediately fully visible. Window size and user matrix carry over;
    /// render-mode flags reset with the log.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DebugError::InvalidPicture`] when the picture
    /// cannot be decomposed; the previously loaded state is untouched.
    pub fn load(&mut self, picture: Picture) -> DebugResult<()> {
        let (width, height) = self.canvas.window_size();
        let mut canvas = DebugCanvas::from_picture(&picture, width, height)?;
        canvas.set_user_matrix(self.canvas.user_matrix());

        self.index = canvas.len();
        self.canvas = canvas;
        self.picture = Some(picture);
        self.profile_runs = 0;
        tracing::info!("Loaded picture with {} commands", self.canvas.len());
        Ok(())
    }

    /// Advance the cursor by one command, clamped at the end.
    pub fn step(&mut self) {
        self.index = (self.index + 1).min(self.canvas.len());
    }

    /// Move the cursor back by one command, clamped at zero.
    pub fn step_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Move the cursor to the end of the log.
    pub fn play(&mut self) {
        self.index = self.canvas.len();
    }

    /// Move the cursor back to zero.
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Move the cursor to an arbitrary position, clamped to the log.
    pub fn set_index(&mut self, index: usize) {
        self.index = index.min(self.canvas.len());
    }

    /// Current cursor position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of commands in the loaded log.
    #[must_use]
    pub fn size(&self) -> usize {
        self.canvas.len()
    }

    /// The command log.
    #[must_use]
    pub fn canvas(&self) -> &DebugCanvas {
        &self.canvas
    }

    /// Mutable access to the command log.
    pub fn canvas_mut(&mut self) -> &mut DebugCanvas {
        &mut self.canvas
    }

    /// Replay the prefix `[0, cursor)` onto a surface.
    ///
    /// A cursor at zero draws nothing at all.
    ///
    /// # Errors
    ///
    /// Propagates replay errors from the command log.
    pub fn draw(&self, surface: &mut dyn Surface) -> DebugResult<()> {
        if self.index > 0 {
            self.canvas.replay(surface, self.index)?;
        }
        Ok(())
    }

    /// Replay the prefix `[0, cursor)` while recording per-command timing
    /// samples; returns the run's total elapsed milliseconds.
    ///
    /// # Errors
    ///
    /// Propagates replay errors from the command log.
    pub fn profile(&mut self, surface: &mut dyn Surface) -> DebugResult<f64> {
        if self.index == 0 {
            return Ok(0.0);
        }
        let total_ms = self.canvas.replay_timed(surface, self.index)?;
        self.profile_runs += 1;
        Ok(total_ms)
    }

    /// Number of profiling runs recorded since the last load.
    #[must_use]
    pub fn profile_runs(&self) -> usize {
        self.profile_runs
    }

    /// Snapshot the currently visible prefix `[0, cursor)` as a new,
    /// independent picture.
    ///
    /// Later visibility changes or cursor moves do not affect the copy.
    /// Source offsets are not carried over; they refer to the original
    /// serialized picture, which the copy is not.
    #[must_use]
    pub fn copy_picture(&self) -> Picture {
        let ops = self
            .canvas
            .commands()
            .iter()
            .take(self.index)
            .filter(|command| command.is_visible())
            .map(|command| command.op().clone())
            .collect();
        Picture::from_ops(self.picture_cull(), ops)
    }

    /// Cull bounds of the loaded picture, or the empty rect when none is
    /// loaded.
    #[must_use]
    pub fn picture_cull(&self) -> Rect {
        self.picture
            .as_ref()
            .map_or(Rect::EMPTY, Picture::cull_rect)
    }

    /// Whether the command at an index contributes to replay.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DebugError::IndexOutOfRange`] beyond the log.
    pub fn is_command_visible(&self, index: usize) -> DebugResult<bool> {
        self.canvas.is_visible(index)
    }

    /// Toggle a single command's visibility.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DebugError::IndexOutOfRange`] beyond the log.
    pub fn set_command_visible(&mut self, index: usize, visible: bool) -> DebugResult<()> {
        self.canvas.set_visible(index, visible)
    }

    /// Emphasize the command at the replay boundary on the next draw.
    pub fn highlight_current_command(&mut self, on: bool) {
        self.canvas.set_highlight_filter(on);
    }

    /// Set the window size used for the replay clip and overlays.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.canvas.set_window_size(width, height);
    }

    /// Set the user matrix applied ahead of every replayed command.
    pub fn set_user_matrix(&mut self, matrix: Matrix) {
        self.canvas.set_user_matrix(matrix);
    }

    /// Toggle overdraw visualization.
    pub fn set_overdraw_viz(&mut self, enabled: bool) {
        self.canvas.set_overdraw_viz(enabled);
    }

    /// Toggle path-ops clip simplification.
    pub fn set_path_ops(&mut self, enabled: bool) {
        self.canvas.set_allow_simplify_clip(enabled);
    }

    /// Toggle mega visualization mode.
    pub fn set_mega_viz(&mut self, enabled: bool) {
        self.canvas.set_mega_viz(enabled);
    }

    /// Override image sampling quality during replay, or clear with
    /// `None`.
    pub fn set_tex_filter_override(&mut self, level: Option<FilterQuality>) {
        self.canvas.set_tex_filter_override(level);
    }

    /// The cumulative transform at the cursor.
    ///
    /// # Errors
    ///
    /// Propagates state-query errors from the command log.
    pub fn current_matrix(&self) -> DebugResult<Matrix> {
        self.current_state().map(|state| state.matrix)
    }

    /// The flattened device clip at the cursor.
    ///
    /// # Errors
    ///
    /// Propagates state-query errors from the command log.
    pub fn current_clip(&self) -> DebugResult<Rect> {
        self.current_state().map(|state| state.clip)
    }

    /// The full rendering state at the cursor.
    ///
    /// # Errors
    ///
    /// Propagates state-query errors from the command log.
    pub fn current_state(&self) -> DebugResult<RenderState> {
        self.canvas.state_at(self.index)
    }

    /// Topmost visible command containing a device-space point, scanning
    /// the prefix `[0, upto)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DebugError::IndexOutOfRange`] when `upto` exceeds
    /// the log.
    pub fn command_at_point(&self, point: Point, upto: usize) -> DebugResult<Option<usize>> {
        self.canvas.hit_test(point, upto)
    }

    /// One descriptive line per command, hidden commands annotated.
    #[must_use]
    pub fn commands_as_text(&self) -> Vec<String> {
        diagnostics::commands_as_text(&self.canvas)
    }

    /// Multi-line detail for one command.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DebugError::IndexOutOfRange`] beyond the log.
    pub fn command_info(&self, index: usize) -> DebugResult<Vec<String>> {
        diagnostics::command_info(&self.canvas, index)
    }

    /// Recorded timing totals per command kind, descending, plus the
    /// grand total in milliseconds.
    #[must_use]
    pub fn timings_by_kind(&self) -> (Vec<(CommandKind, f64)>, f64) {
        let mut per_kind: HashMap<CommandKind, f64> = HashMap::new();
        let mut total = 0.0;
        for command in self.canvas.commands() {
            if command.timings().is_empty() {
                continue;
            }
            let sum: f64 = command.timings().iter().sum();
            *per_kind.entry(command.kind()).or_insert(0.0) += sum;
            total += sum;
        }
        let mut times: Vec<(CommandKind, f64)> = per_kind.into_iter().collect();
        times.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        (times, total)
    }

    /// Ranked timing overview across recorded profiling runs.
    #[must_use]
    pub fn overview_text(&self) -> String {
        let (times, total_ms) = self.timings_by_kind();
        diagnostics::overview_text(&times, total_ms, self.profile_runs)
    }

    /// The nested clip stack in effect at the cursor, as text.
    ///
    /// # Errors
    ///
    /// Propagates state-query errors from the command log.
    pub fn clip_stack_text(&self) -> DebugResult<String> {
        diagnostics::clip_stack_text(&self.canvas, self.index)
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
