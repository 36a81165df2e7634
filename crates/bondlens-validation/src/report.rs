//! Validation diagnostics.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a diagnostic blocks valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks valuation of the row (or the batch, for schema errors).
    Error,
    /// Informational only.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 0-based row index; `None` for table-level findings.
    pub row: Option<usize>,
    /// Error or warning.
    pub severity: Severity,
    /// Full message, prefixed with the row label for row findings.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn table(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            row: None,
            severity,
            message: message.into(),
        }
    }

    pub(crate) fn row(row: usize, severity: Severity, label: &str, message: impl fmt::Display) -> Self {
        Self {
            row: Some(row),
            severity,
            message: format!("{label}: {message}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors and warnings, each in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Hard errors.
    pub errors: Vec<Diagnostic>,
    /// Soft warnings.
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    /// True when there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    pub(crate) fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    /// Error messages in order.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Warning messages in order.
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Rows (0-based) carrying at least one error.
    #[must_use]
    pub fn invalid_rows(&self) -> BTreeSet<usize> {
        self.errors.iter().filter_map(|d| d.row).collect()
    }

    /// Returns true if a table-level error stopped validation.
    #[must_use]
    pub fn has_schema_error(&self) -> bool {
        self.errors.iter().any(|d| d.row.is_none())
    }

    /// `(is_valid, errors, warnings)`.
    #[must_use]
    pub fn into_parts(self) -> (bool, Vec<String>, Vec<String>) {
        (self.is_valid(), self.error_messages(), self.warning_messages())
    }
}
