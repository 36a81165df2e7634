//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, FundsArgs, SampleArgs, ValidateArgs};

/// Bondlens - Bond portfolio valuation and interest-rate risk
#[derive(Parser)]
#[command(name = "bondlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Settings file (TOML). Defaults to the user config directory.
    #[arg(short, long, global = true, env = "BONDLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Decimal places for table output
    #[arg(long, default_value_t = 4, global = true)]
    pub precision: usize,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate, value and stress a bond portfolio file
    Analyze(AnalyzeArgs),

    /// Check a bond portfolio file and report errors and warnings
    Validate(ValidateArgs),

    /// List the funds in a bond portfolio file
    Funds(FundsArgs),

    /// Write the demonstration portfolio as CSV
    Sample(SampleArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "bondlens", "--format", "json", "analyze", "bonds.csv", "--fund", "Fund_A", "--step",
            "50",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.file, PathBuf::from("bonds.csv"));
                assert_eq!(args.fund.as_deref(), Some("Fund_A"));
                assert_eq!(args.step, Some(50));
                assert_eq!(args.start, None);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_negative_start_accepted() {
        let cli =
            Cli::try_parse_from(["bondlens", "analyze", "x.csv", "--start", "-100"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => assert_eq!(args.start, Some(-100)),
            _ => panic!("expected analyze"),
        }
    }
}
