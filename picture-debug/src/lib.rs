//! # Picture Debug
//!
//! A draw-command debugger for recorded pictures: decompose a picture
//! into an ordered command log, step through it one operation at a time,
//! suppress individual commands, and inspect transform/clip state,
//! geometry hits, and timing at any point in the sequence.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Debugger                   │
//! │  cursor over [0, len] - step/play/rewind    │
//! ├──────────────────────┬──────────────────────┤
//! │  DebugCanvas         │  Diagnostics         │
//! │  - command log       │  - command text      │
//! │  - replay prefix     │  - timing overview   │
//! │  - state / hit-test  │  - clip stack text   │
//! ├──────────────────────┴──────────────────────┤
//! │  picture-core: Picture -> DrawOp -> Surface │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded and synchronous throughout: every operation runs to
//! completion on the calling thread, and a debugger instance is meant to
//! be exclusively owned by one controlling thread.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod command;
pub mod debugger;
pub mod diagnostics;
pub mod error;
pub mod tracker;

pub use canvas::DebugCanvas;
pub use command::DrawCommand;
pub use debugger::Debugger;
pub use error::{DebugError, DebugResult};
pub use tracker::{ClipEntry, RenderState, StateTracker};

/// Picture debug version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
