//! Batch-level and row-level input errors.

use bondlens_analytics::AnalyticsError;
use bondlens_portfolio::PortfolioError;
use thiserror::Error;

use crate::record::Column;

/// Schema or shape violation; fatal for the whole batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Required columns are absent.
    #[error("Missing required columns: {}", join_columns(.0))]
    MissingColumns(Vec<Column>),

    /// The table has no rows.
    #[error("Portfolio data is empty. Please add at least one bond.")]
    EmptyDataSet,
}

fn join_columns(columns: &[Column]) -> String {
    columns
        .iter()
        .map(Column::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a single row could not become a position.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowErrorKind {
    /// A required cell is blank.
    #[error("Missing value for {0}")]
    MissingValue(Column),

    /// A numeric cell could not be read.
    #[error("Invalid number for {column} ({raw})")]
    InvalidNumber {
        /// The column of the cell.
        column: Column,
        /// The raw cell text.
        raw: String,
    },

    /// The bond terms were rejected or could not be valued.
    #[error("Error calculating bond metrics - {0}")]
    Valuation(#[from] AnalyticsError),

    /// The position was rejected.
    #[error("{0}")]
    Position(#[from] PortfolioError),
}

/// A row-level failure; never fatal for other rows.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{label}: {kind}")]
pub struct RowError {
    /// 0-based row index.
    pub row: usize,
    /// Row label (bond name or `Row N`).
    pub label: String,
    /// What went wrong.
    #[source]
    pub kind: RowErrorKind,
}

impl RowError {
    /// Creates a row error.
    #[must_use]
    pub fn new(row: usize, label: impl Into<String>, kind: impl Into<RowErrorKind>) -> Self {
        Self {
            row,
            label: label.into(),
            kind: kind.into(),
        }
    }
}
