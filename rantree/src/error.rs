//! Error types for sampling, invocation and structure generation.

use std::fmt;

/// Errors raised while building samplers, invokers or generators.
///
/// Every error is raised synchronously by the call that breaks its contract. Nothing is retried
/// internally, and a failed generation never returns a partial structure.
#[derive(Debug, Clone, PartialEq)]
pub enum GenError {
    /// A candidate set was empty or absent
    InvalidInput { message: String },

    /// A weight sequence did not match the candidate sequence in length
    DimensionMismatch { candidates: usize, weights: usize },

    /// An element intended for invocation cannot be invoked
    NotCallable { index: usize, found: String },

    /// A shape strategy did not provide a required hook
    UnimplementedStrategy { hook: &'static str },

    /// A configuration value is out of range
    InvalidConfig {
        field: &'static str,
        message: String,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            GenError::DimensionMismatch {
                candidates,
                weights,
            } => write!(
                f,
                "Dimension mismatch: {} weights given for {} candidates",
                weights, candidates
            ),
            GenError::NotCallable { index, found } => {
                write!(f, "Not callable: element {} ({}) cannot be invoked", index, found)
            }
            GenError::UnimplementedStrategy { hook } => {
                write!(f, "Unimplemented strategy: hook `{}` is not implemented", hook)
            }
            GenError::InvalidConfig { field, message } => {
                write!(f, "Configuration error: {} (field: {})", message, field)
            }
        }
    }
}

impl std::error::Error for GenError {}

/// Result type used throughout the crate
pub type GenResult<T> = Result<T, GenError>;

impl GenError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a not-callable error for the element at `index`
    pub fn not_callable(index: usize, found: impl Into<String>) -> Self {
        Self::NotCallable {
            index,
            found: found.into(),
        }
    }

    /// Create an error for a hook the strategy did not override
    pub fn unimplemented(hook: &'static str) -> Self {
        Self::UnimplementedStrategy { hook }
    }

    /// Create a configuration error for `field`
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
