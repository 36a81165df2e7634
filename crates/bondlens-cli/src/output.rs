//! Output formatting utilities.

#![allow(dead_code)]

use bondlens_validation::group_digits;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Rendering state passed explicitly to every report function.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Output format.
    pub format: OutputFormat,
    /// Timestamp stamped on reports.
    pub as_of: DateTime<Utc>,
    /// Decimal places for table cells.
    pub precision: usize,
}

impl RenderContext {
    /// Creates a context stamped with the current time.
    pub fn new(format: OutputFormat, precision: usize) -> Self {
        Self {
            format,
            as_of: Utc::now(),
            precision,
        }
    }

    /// Overrides the report timestamp.
    #[must_use]
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    /// True for the human-readable format.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Formats a number at the configured precision.
    pub fn num(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.precision)
    }

    /// Formats a currency amount with two decimals and thousands separators.
    pub fn money(&self, value: f64) -> String {
        format_money(value)
    }

    /// Formats a percentage with two decimals.
    pub fn pct(&self, value: f64) -> String {
        format!("{value:.2}%")
    }

    /// Prints a list of records. Tables use `to_row`; JSON and CSV serialize
    /// the records themselves.
    pub fn print_records<T, R, F>(&self, data: &[T], to_row: F) -> anyhow::Result<()>
    where
        T: Serialize,
        R: Tabled,
        F: Fn(&T) -> R,
    {
        match self.format {
            OutputFormat::Table => {
                let rows: Vec<R> = data.iter().map(to_row).collect();
                print_table(&rows);
                Ok(())
            }
            OutputFormat::Json => print_json(data),
            OutputFormat::Csv => print_csv(data),
        }
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}

/// Prints any value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints records as CSV with a header row.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// `1234567.891` → `$1,234,567.89`.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    format!("{sign}${}.{frac}", group_digits(whole))
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
