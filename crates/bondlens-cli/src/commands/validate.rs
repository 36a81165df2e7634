//! Validate command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondlens_validation::{validate, Diagnostic, ValidationReport};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::input::read_table;
use crate::output::{print_error, print_header, print_json, print_success, RenderContext};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Bond portfolio CSV file
    pub file: PathBuf,
}

#[derive(Tabled)]
struct DiagnosticRow {
    #[tabled(rename = "Row")]
    row: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&Diagnostic> for DiagnosticRow {
    fn from(d: &Diagnostic) -> Self {
        Self {
            row: d.row.map_or_else(|| "-".to_string(), |r| (r + 1).to_string()),
            severity: format!("{:?}", d.severity),
            message: d.message.clone(),
        }
    }
}

#[derive(Serialize)]
struct ValidationOutput<'a> {
    file: String,
    as_of: chrono::DateTime<chrono::Utc>,
    is_valid: bool,
    rows: usize,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

/// Execute the validate command. Returns whether the file is valid.
pub fn execute(args: ValidateArgs, settings: &Settings, ctx: &RenderContext) -> Result<bool> {
    let table = read_table(&args.file)?;
    let report = validate(&table, &settings.validation, &settings.analytics);
    let valid = report.is_valid();

    let diagnostics: Vec<&Diagnostic> = report.errors.iter().chain(report.warnings.iter()).collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("Validation: {}", args.file.display()));
            if !diagnostics.is_empty() {
                ctx.print_records(&diagnostics, |d| DiagnosticRow::from(*d))?;
            }
            if valid {
                print_success(&format!(
                    "{} bond(s) passed validation with {} warning(s)",
                    table.len(),
                    report.warnings.len()
                ));
            } else {
                print_error(&format!(
                    "{} error(s), {} warning(s)",
                    report.errors.len(),
                    report.warnings.len()
                ));
            }
        }
        OutputFormat::Json => print_json(&ValidationOutput {
            file: args.file.display().to_string(),
            as_of: ctx.as_of,
            is_valid: valid,
            rows: table.len(),
            report: &report,
        })?,
        OutputFormat::Csv => ctx.print_records(&diagnostics, |d| DiagnosticRow::from(*d))?,
    }

    Ok(valid)
}
