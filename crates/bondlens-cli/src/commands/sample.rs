//! Sample command implementation.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use bondlens_validation::sample_table;

/// Arguments for the sample command.
#[derive(Args, Debug)]
pub struct SampleArgs {}

/// Writes the demonstration portfolio as CSV to `out`.
pub fn write_sample<W: Write>(out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for record in sample_table().records() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Execute the sample command. Always CSV, whatever `--format` says.
pub fn execute(_args: SampleArgs) -> Result<()> {
    write_sample(std::io::stdout().lock())
}
