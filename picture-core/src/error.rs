//! Error types for picture operations.

use thiserror::Error;

/// Result type for picture operations.
pub type PictureResult<T> = Result<T, PictureError>;

/// Errors that can occur while building or serializing pictures.
#[derive(Debug, Error)]
pub enum PictureError {
    /// Picture serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Source offsets do not line up with recorded operations.
    #[error("Offset count mismatch: {offsets} offsets for {ops} operations")]
    OffsetCount {
        /// Number of recorded operations.
        ops: usize,
        /// Number of offsets supplied.
        offsets: usize,
    },
}
