//! Error types for portfolio analytics.

use bondlens_analytics::AnalyticsError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A position could not be constructed.
    #[error("Invalid position '{name}': {reason}")]
    InvalidPosition {
        /// The bond name.
        name: String,
        /// The reason the position is invalid.
        reason: String,
    },

    /// The scenario shift grid is unusable.
    #[error("Invalid shift grid: {reason}")]
    InvalidShiftGrid {
        /// The reason the grid is invalid.
        reason: String,
    },

    /// A position could not be re-priced under a yield shift.
    #[error("Scenario at {shift_bps} bps failed for '{name}': {reason}")]
    ScenarioFailed {
        /// The bond name.
        name: String,
        /// The shift in basis points.
        shift_bps: f64,
        /// What went wrong.
        reason: String,
    },

    /// Bond valuation failed.
    #[error("Valuation failed: {0}")]
    Valuation(#[from] AnalyticsError),
}

impl PortfolioError {
    /// Create an invalid position error.
    #[must_use]
    pub fn invalid_position(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a scenario failure error.
    #[must_use]
    pub fn scenario_failed(
        name: impl Into<String>,
        shift_bps: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::ScenarioFailed {
            name: name.into(),
            shift_bps,
            reason: reason.into(),
        }
    }

    /// Create an invalid shift grid error.
    #[must_use]
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidShiftGrid {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::invalid_position("Treasury 5Y", "quantity must be positive");
        assert!(err.to_string().contains("Treasury 5Y"));
        assert!(err.to_string().contains("quantity must be positive"));

        let err = PortfolioError::invalid_grid("step must be positive");
        assert_eq!(err.to_string(), "Invalid shift grid: step must be positive");
    }

    #[test]
    fn test_from_analytics_error() {
        let err: PortfolioError = AnalyticsError::MissingTerm("face_value").into();
        assert!(matches!(err, PortfolioError::Valuation(_)));
    }
}
