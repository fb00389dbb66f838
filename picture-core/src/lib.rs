//! # Picture Core
//!
//! Core picture model for the draw-command debugger: geometry, paint,
//! the closed [`DrawOp`] operation variant, the [`Surface`] seam that
//! replay writes into, and immutable recorded [`Picture`]s.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                picture-core                 │
//! ├──────────────────────┬──────────────────────┤
//! │  Data model          │  Recording           │
//! │  - Point/Rect/Matrix │  - Surface trait     │
//! │  - Paint/Shape       │  - PictureRecorder   │
//! │  - DrawOp variants   │  - Picture playback  │
//! └──────────────────────┴──────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod picture;
pub mod shape;
pub mod surface;

pub use command::{CommandKind, DrawOp, ImageRef};
pub use error::{PictureError, PictureResult};
pub use geometry::{Matrix, Point, Rect};
pub use paint::{BlendMode, Color, FilterQuality, Paint, PaintStyle};
pub use picture::{Picture, PictureId, PictureRecorder};
pub use shape::Shape;
pub use surface::Surface;

/// Picture core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
