//! The drawing target seam.
//!
//! Replay writes into a [`Surface`] and never reads back from it; any
//! rasterizer, recorder, or state tracker can stand behind the trait.

use crate::geometry::{Matrix, Point, Rect};
use crate::paint::Paint;
use crate::shape::Shape;
use crate::ImageRef;

/// An immediate-mode drawing target.
///
/// One method per primitive operation. Implementations are in-memory and
/// infallible; a backend that can fail should surface that through its own
/// channel after replay completes.
pub trait Surface {
    /// Push the current transform/clip state.
    fn save(&mut self);

    /// Pop back to the most recent saved state.
    ///
    /// A restore with no matching save is a no-op.
    fn restore(&mut self);

    /// Concatenate a transform onto the current matrix.
    fn concat(&mut self, matrix: &Matrix);

    /// Intersect the current clip with a rectangle.
    fn clip_rect(&mut self, rect: &Rect);

    /// Intersect the current clip with a shape.
    fn clip_shape(&mut self, shape: &Shape);

    /// Fill or stroke a rectangle.
    fn draw_rect(&mut self, rect: &Rect, paint: &Paint);

    /// Fill or stroke an oval inscribed in a rectangle.
    fn draw_oval(&mut self, oval: &Rect, paint: &Paint);

    /// Fill or stroke a shape.
    fn draw_shape(&mut self, shape: &Shape, paint: &Paint);

    /// Draw an image scaled into a destination rectangle.
    fn draw_image(&mut self, image: &ImageRef, dst: &Rect, paint: &Paint);

    /// Draw a run of text at a baseline origin.
    fn draw_text(&mut self, text: &str, origin: Point, size: f32, paint: &Paint);
}
