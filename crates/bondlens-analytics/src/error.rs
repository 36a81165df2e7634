//! Error types for the valuation engine.

use bondlens_math::MathError;
use thiserror::Error;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised while building bond terms or computing bond metrics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A term failed its bound check.
    #[error("invalid {field}: {reason}")]
    InvalidTerms {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required term was not supplied to the builder.
    #[error("missing required term: {0}")]
    MissingTerm(&'static str),

    /// Unsupported coupon frequency.
    #[error("unsupported frequency {0}: expected 1, 2, 4 or 12 payments per year")]
    UnsupportedFrequency(u32),

    /// Yield solver failed.
    #[error("yield solver failed: {0}")]
    YieldSolverFailed(#[from] MathError),

    /// A computed metric was NaN or infinite.
    #[error("non-finite {field} computed")]
    NonFinite {
        /// The metric that could not be computed.
        field: &'static str,
    },

    /// Invalid solver configuration.
    #[error("invalid solver settings: {0}")]
    InvalidSettings(String),
}

impl AnalyticsError {
    /// Creates an invalid terms error.
    #[must_use]
    pub fn invalid_terms(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a non-finite metric error.
    #[must_use]
    pub fn non_finite(field: &'static str) -> Self {
        Self::NonFinite { field }
    }

    /// Returns the field this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTerms { field, .. } | Self::NonFinite { field } => Some(field),
            Self::MissingTerm(field) => Some(field),
            Self::UnsupportedFrequency(_) => Some("frequency"),
            Self::YieldSolverFailed(_) | Self::InvalidSettings(_) => None,
        }
    }
}

/// Returns `value` unchanged when finite, otherwise a [`AnalyticsError::NonFinite`].
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> AnalyticsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::non_finite(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::invalid_terms("face_value", "must be positive (got -100)");
        assert_eq!(
            err.to_string(),
            "invalid face_value: must be positive (got -100)"
        );
        assert_eq!(err.field(), Some("face_value"));

        let err = AnalyticsError::non_finite("convexity");
        assert!(err.to_string().contains("convexity"));
    }

    #[test]
    fn test_from_math_error() {
        let err: AnalyticsError = MathError::convergence_failed(100, 1e-3).into();
        assert!(matches!(err, AnalyticsError::YieldSolverFailed(_)));
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("price", 1.0).is_ok());
        assert_eq!(
            ensure_finite("price", f64::NAN),
            Err(AnalyticsError::non_finite("price"))
        );
    }
}
