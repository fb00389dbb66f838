//! A draw operation plus its debugger annotations.

use picture_core::{CommandKind, DrawOp};

use crate::diagnostics;

/// One entry in the command log.
///
/// The operation and its source offset are fixed at build time; only the
/// visibility flag and the timing samples mutate afterwards.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// The recorded operation.
    op: DrawOp,
    /// Byte offset into the original serialized picture, when known.
    source_offset: Option<u64>,
    /// Whether the command contributes to replay.
    visible: bool,
    /// Elapsed milliseconds, one sample per measured replay run.
    timings: Vec<f64>,
}

impl DrawCommand {
    /// Create a command for a decomposed operation.
    #[must_use]
    pub fn new(op: DrawOp, source_offset: Option<u64>) -> Self {
        Self {
            op,
            source_offset,
            visible: true,
            timings: Vec::new(),
        }
    }

    /// The recorded operation.
    #[must_use]
    pub fn op(&self) -> &DrawOp {
        &self.op
    }

    /// The kind of the recorded operation.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.op.kind()
    }

    /// Byte offset into the original serialized picture, when known.
    #[must_use]
    pub fn source_offset(&self) -> Option<u64> {
        self.source_offset
    }

    /// Whether the command contributes to replay.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set whether the command contributes to replay.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Timing samples in milliseconds, one per measured replay run.
    #[must_use]
    pub fn timings(&self) -> &[f64] {
        &self.timings
    }

    /// Record a timing sample from a measured replay run.
    pub fn push_timing(&mut self, elapsed_ms: f64) {
        self.timings.push(elapsed_ms);
    }

    /// Human-readable one-line description of the operation.
    #[must_use]
    pub fn text(&self) -> String {
        diagnostics::describe(&self.op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picture_core::{Paint, Rect};

    #[test]
    fn test_defaults_and_mutation() {
        let mut cmd = DrawCommand::new(
            DrawOp::DrawRect {
                rect: Rect::from_xywh(0.0, 0.0, 5.0, 5.0),
                paint: Paint::default(),
            },
            Some(16),
        );
        assert!(cmd.is_visible());
        assert_eq!(cmd.source_offset(), Some(16));
        assert!(cmd.timings().is_empty());

        cmd.set_visible(false);
        cmd.push_timing(0.25);
        assert!(!cmd.is_visible());
        assert_eq!(cmd.timings(), &[0.25]);
        assert_eq!(cmd.kind(), CommandKind::DrawRect);
    }
}
