//! Error types for treegp
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for operator configuration failures
///
/// Selection and variation operators validate their parameters once, at
/// construction time. Malformed runtime inputs (an empty population, an
/// out-of-range index) are caller contract violations and panic instead
/// of being silently masked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for operator construction
pub type GpResult<T> = Result<T, OperatorError>;
