//! Partition error types.

use thiserror::Error;

/// Site generation error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Every draw for one site collided with an existing site.
    #[error("no unique site found for index {index} after {attempts} attempts")]
    Exhausted { index: usize, attempts: usize },

    /// A bounding box corner is NaN or infinite.
    #[error("bounding box must be finite")]
    NonFiniteBounds,

    /// The box is finite but too wide to sample: its extent overflows `f32`.
    #[error("bounding box extent overflows f32")]
    SpanOverflow,
}

/// Result type for site generation.
pub type GenerateResult<T> = Result<T, GenerateError>;
