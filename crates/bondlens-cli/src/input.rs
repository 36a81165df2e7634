//! CSV file → [`BondTable`].

use std::io::Read;
use std::path::Path;

use bondlens_validation::BondTable;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Reads a headed CSV file. Unknown columns are ignored.
pub fn read_table(path: &Path) -> CliResult<BondTable> {
    let file = std::fs::File::open(path).map_err(|e| input_error(path, e))?;
    let table = parse_table(file).map_err(|e| input_error(path, e))?;
    debug!(path = %path.display(), rows = table.len(), "input read");
    Ok(table)
}

/// Parses headed CSV from any reader.
pub fn parse_table<R: Read>(reader: R) -> Result<BondTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(BondTable::from_text_rows(&headers, rows))
}

fn input_error(path: &Path, error: impl std::fmt::Display) -> CliError {
    CliError::Input {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}
