//! Error types for the layout engine.

use crate::models::Axis;
use thiserror::Error;

/// Result type for layout engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the layout engine.
///
/// All variants are raised where the problem is detected. The engine never
/// substitutes defaults for bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed or inconsistent input
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Lookup outside the computed domain
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Projection onto an axis whose range has zero width
    #[error("Degenerate bounds: {axis} axis has zero width")]
    DegenerateBounds {
        /// Axis with `min == max`
        axis: Axis,
    },
}

impl EngineError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an out-of-range error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EngineError::configuration("port count must be at least 1").to_string(),
            "Configuration error: port count must be at least 1"
        );
        assert_eq!(
            EngineError::DegenerateBounds { axis: Axis::Y }.to_string(),
            "Degenerate bounds: y axis has zero width"
        );
    }
}
