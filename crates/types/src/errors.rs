//! Error types shared between the math, core, and keeper crates.

use thiserror::Error;

/// Errors surfaced by parameter updates, rebase attempts, and fixed-point
/// arithmetic. A failed rebase attempt leaves engine state untouched; the
/// error only describes why the attempt was aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RebaseError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("caller is not authorized")]
    Unauthorized,

    #[error("math overflow")]
    MathOverflow,

    /// A subtraction that would drop below zero. None of the built-in
    /// operations produce it (the contraction path floors at zero instead);
    /// part of the arithmetic error vocabulary for external integrations.
    #[error("math underflow")]
    MathUnderflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("invalid price reading")]
    InvalidPriceReading,
}

/// Result type using rebase errors
pub type RebaseResult<T> = Result<T, RebaseError>;

impl RebaseError {
    /// Create an invalid-parameter error naming the offending field
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RebaseError::invalid_parameter("rebase_interval", "must be positive");
        assert_eq!(
            format!("{}", err),
            "invalid parameter rebase_interval: must be positive"
        );

        let err = RebaseError::OracleUnavailable("feed not found".to_string());
        assert!(format!("{}", err).contains("feed not found"));
    }
}
