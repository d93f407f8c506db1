//! Math error types.

use thiserror::Error;

/// Math error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// Row or column index outside `0..=3`.
    #[error("index {index} out of range: indices must be between 0 and 3")]
    IndexOutOfRange { index: usize },
}

/// Result type for fallible matrix accessors.
pub type MathResult<T> = Result<T, MathError>;
