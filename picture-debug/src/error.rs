//! Error types for debugger operations.

use thiserror::Error;

/// Result type for debugger operations.
pub type DebugResult<T> = Result<T, DebugError>;

/// Errors that can occur while loading or inspecting a command log.
#[derive(Debug, Error)]
pub enum DebugError {
    /// The picture could not be decomposed into a command log.
    #[error("Invalid picture: {0}")]
    InvalidPicture(String),

    /// A command index beyond the end of the log.
    #[error("Index {index} out of range for log of {len} commands")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The log length.
        len: usize,
    },
}
