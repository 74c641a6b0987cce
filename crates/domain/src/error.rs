//! Unified error types for the domain layer
//!
//! Provides a common error type for construction and lifecycle failures,
//! so that loaders can downgrade them without resorting to String or anyhow.
//!
//! A resolution query that finds nothing is NOT an error: it is reported as
//! `None` by the resolver.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty windows, out-of-range day index)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for invariant violations.
    ///
    /// Use this when a value cannot be constructed:
    /// - Required fields are empty or missing
    /// - Indices are outside the allowed range
    ///
    /// # Example
    /// ```ignore
    /// if windows.is_empty() {
    ///     return Err(DomainError::validation("Schedule entry needs at least one window"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for TimeBlock {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "morning" => Ok(Self::Morning),
    ///             _ => Err(DomainError::parse(format!("Unknown time block: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}
