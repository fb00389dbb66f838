//! Human-readable views of command-log state.

use picture_core::{CommandKind, DrawOp, Matrix, PaintStyle, Point, Rect, Shape};

use crate::canvas::DebugCanvas;
use crate::error::DebugResult;

/// One-line description of a draw operation.
#[must_use]
pub fn describe(op: &DrawOp) -> String {
    match op {
        DrawOp::Save => "Save".to_string(),
        DrawOp::Restore => "Restore".to_string(),
        DrawOp::Concat { matrix } => format!("Concat {}", fmt_matrix(matrix)),
        DrawOp::ClipRect { rect } => format!("ClipRect {}", fmt_rect(rect)),
        DrawOp::ClipShape { shape } => format!("ClipShape {}", fmt_shape(shape)),
        DrawOp::DrawRect { rect, paint } => {
            format!("DrawRect {} {} {}", fmt_rect(rect), paint.color, fmt_style(paint.style))
        }
        DrawOp::DrawOval { oval, paint } => {
            format!("DrawOval {} {} {}", fmt_rect(oval), paint.color, fmt_style(paint.style))
        }
        DrawOp::DrawShape { shape, paint } => {
            format!("DrawShape {} {} {}", fmt_shape(shape), paint.color, fmt_style(paint.style))
        }
        DrawOp::DrawImage { image, dst, .. } => format!(
            "DrawImage {}x{} '{}' into {}",
            image.width,
            image.height,
            image.source,
            fmt_rect(dst)
        ),
        DrawOp::DrawText { text, origin, size, .. } => {
            format!("DrawText \"{text}\" at {} size {size}", fmt_point(*origin))
        }
    }
}

/// One descriptive line per command, in log order.
///
/// Debug listings show hidden commands too, annotated.
#[must_use]
pub fn commands_as_text(canvas: &DebugCanvas) -> Vec<String> {
    canvas
        .commands()
        .iter()
        .map(|command| {
            if command.is_visible() {
                command.text()
            } else {
                format!("(hidden) {}", command.text())
            }
        })
        .collect()
}

/// Multi-line detail for one command.
///
/// # Errors
///
/// Returns [`crate::DebugError::IndexOutOfRange`] beyond the log.
pub fn command_info(canvas: &DebugCanvas, index: usize) -> DebugResult<Vec<String>> {
    let command = canvas.command(index)?;
    let mut lines = vec![
        format!("{index}: {}", command.text()),
        format!("Kind: {}", command.kind()),
        format!("Visible: {}", command.is_visible()),
    ];
    if let Some(offset) = command.source_offset() {
        lines.push(format!("Source offset: {offset}"));
    }
    let timings = command.timings();
    if !timings.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let mean = timings.iter().sum::<f64>() / timings.len() as f64;
        lines.push(format!("Timings: {} runs, mean {mean:.3}ms", timings.len()));
    }
    Ok(lines)
}

/// Ranked timing overview: each kind's share of the total, descending.
///
/// A zero or missing total yields a defined "no data" string, never an
/// error.
#[must_use]
pub fn overview_text(times: &[(CommandKind, f64)], total_ms: f64, num_runs: usize) -> String {
    if total_ms <= 0.0 || times.is_empty() {
        return "No timing data collected.".to_string();
    }
    let mut ranked = times.to_vec();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut lines: Vec<String> = ranked
        .iter()
        .map(|(kind, ms)| format!("{:5.1}%  {ms:9.3}ms  {kind}", ms / total_ms * 100.0))
        .collect();
    lines.push(String::new());
    if num_runs > 1 {
        #[allow(clippy::cast_precision_loss)]
        let per_run = total_ms / num_runs as f64;
        lines.push(format!(
            "Total time: {total_ms:.3}ms over {num_runs} runs ({per_run:.3}ms per run)"
        ));
    } else {
        lines.push(format!("Total time: {total_ms:.3}ms"));
    }
    lines.join("\n")
}

/// The clip stack in effect at `index`, one entry per applied clip,
/// indented by save depth, with the flattened device clip last.
///
/// # Errors
///
/// Returns [`crate::DebugError::IndexOutOfRange`] when `index` exceeds
/// the log.
pub fn clip_stack_text(canvas: &DebugCanvas, index: usize) -> DebugResult<String> {
    let state = canvas.state_at(index)?;
    if state.clip_stack.is_empty() {
        return Ok("No active clips.".to_string());
    }
    let mut lines: Vec<String> = state
        .clip_stack
        .iter()
        .map(|entry| {
            format!(
                "{}{} device={}",
                "  ".repeat(entry.depth),
                entry.kind,
                fmt_rect(&entry.device_rect)
            )
        })
        .collect();
    lines.push(format!("Flattened clip: {}", fmt_rect(&state.clip)));
    Ok(lines.join("\n"))
}

fn fmt_rect(rect: &Rect) -> String {
    format!("[{} {} {} {}]", rect.x, rect.y, rect.width, rect.height)
}

fn fmt_point(point: Point) -> String {
    format!("({}, {})", point.x, point.y)
}

fn fmt_matrix(matrix: &Matrix) -> String {
    format!(
        "[{} {} {} / {} {} {}]",
        matrix.sx, matrix.kx, matrix.tx, matrix.ky, matrix.sy, matrix.ty
    )
}

fn fmt_shape(shape: &Shape) -> String {
    match shape {
        Shape::Rect(rect) => format!("rect {}", fmt_rect(rect)),
        Shape::Oval(rect) => format!("oval {}", fmt_rect(rect)),
        Shape::Polygon(points) => {
            format!("polygon({} vertices) {}", points.len(), fmt_rect(&shape.bounds()))
        }
    }
}

fn fmt_style(style: PaintStyle) -> &'static str {
    match style {
        PaintStyle::Fill => "fill",
        PaintStyle::Stroke => "stroke",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picture_core::{Color, Paint, Picture, PictureRecorder, Surface};

    fn canvas_with(build: impl FnOnce(&mut PictureRecorder)) -> DebugCanvas {
        let mut recorder = PictureRecorder::new();
        build(&mut recorder);
        let picture = recorder.finish(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
        DebugCanvas::from_picture(&picture, 100, 100).expect("valid picture")
    }

    #[test]
    fn test_describe_draw_rect() {
        let op = DrawOp::DrawRect {
            rect: Rect::from_xywh(10.0, 10.0, 50.0, 40.0),
            paint: Paint::fill(Color::rgb(255, 0, 0)),
        };
        assert_eq!(describe(&op), "DrawRect [10 10 50 40] #ff0000ff fill");
    }

    #[test]
    fn test_describe_text_and_image() {
        let text = DrawOp::DrawText {
            text: "hi".to_string(),
            origin: Point::new(5.0, 20.0),
            size: 12.0,
            paint: Paint::default(),
        };
        assert_eq!(describe(&text), "DrawText \"hi\" at (5, 20) size 12");

        let image = DrawOp::DrawImage {
            image: picture_core::ImageRef {
                source: "img:logo".to_string(),
                width: 32,
                height: 16,
            },
            dst: Rect::from_xywh(0.0, 0.0, 64.0, 32.0),
            paint: Paint::default(),
        };
        assert_eq!(describe(&image), "DrawImage 32x16 'img:logo' into [0 0 64 32]");
    }

    #[test]
    fn test_hidden_commands_are_annotated() {
        let mut canvas = canvas_with(|recorder| {
            recorder.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &Paint::default());
            recorder.draw_oval(&Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &Paint::default());
        });
        canvas.set_visible(0, false).expect("in range");

        let lines = commands_as_text(&canvas);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("(hidden) DrawRect"));
        assert!(lines[1].starts_with("DrawOval"));
    }

    #[test]
    fn test_command_info_lines() {
        let picture = {
            let mut recorder = PictureRecorder::new();
            recorder.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &Paint::default());
            recorder.finish(Rect::EMPTY)
        };
        let ops = picture.ops().to_vec();
        let picture = Picture::from_ops(Rect::EMPTY, ops)
            .with_offsets(vec![24])
            .expect("matching offsets");
        let mut canvas = DebugCanvas::from_picture(&picture, 100, 100).expect("valid picture");
        canvas.push_timing(0, 0.5).expect("in range");
        canvas.push_timing(0, 1.5).expect("in range");

        let info = command_info(&canvas, 0).expect("in range");
        assert!(info.contains(&"Kind: DrawRect".to_string()));
        assert!(info.contains(&"Visible: true".to_string()));
        assert!(info.contains(&"Source offset: 24".to_string()));
        assert!(info.contains(&"Timings: 2 runs, mean 1.000ms".to_string()));

        assert!(command_info(&canvas, 1).is_err());
    }

    #[test]
    fn test_overview_guards_zero_total() {
        assert_eq!(overview_text(&[], 0.0, 0), "No timing data collected.");
        assert_eq!(
            overview_text(&[(CommandKind::DrawRect, 1.0)], 0.0, 3),
            "No timing data collected."
        );
    }

    #[test]
    fn test_overview_ranks_by_share() {
        let times = [
            (CommandKind::DrawOval, 1.0),
            (CommandKind::DrawRect, 3.0),
        ];
        let text = overview_text(&times, 4.0, 2);
        let rect_pos = text.find("DrawRect").expect("listed");
        let oval_pos = text.find("DrawOval").expect("listed");
        assert!(rect_pos < oval_pos);
        assert!(text.contains("75.0%"));
        assert!(text.contains("over 2 runs (2.000ms per run)"));
    }

    #[test]
    fn test_clip_stack_text_nests_by_depth() {
        let canvas = canvas_with(|recorder| {
            recorder.clip_rect(&Rect::from_xywh(0.0, 0.0, 80.0, 80.0));
            recorder.save();
            recorder.clip_rect(&Rect::from_xywh(10.0, 10.0, 40.0, 40.0));
            recorder.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &Paint::default());
        });

        let text = clip_stack_text(&canvas, 4).expect("in range");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ClipRect device=[0 0 80 80]");
        assert_eq!(lines[1], "  ClipRect device=[10 10 40 40]");
        assert_eq!(lines[2], "Flattened clip: [10 10 40 40]");

        let empty = clip_stack_text(&canvas, 0).expect("in range");
        assert_eq!(empty, "No active clips.");
    }
}
