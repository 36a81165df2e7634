//! Bondlens CLI - Command-line interface for bond portfolio analytics.
//!
//! # Usage
//!
//! ```bash
//! # Write the demonstration portfolio
//! bondlens sample > bonds.csv
//!
//! # Check a file
//! bondlens validate bonds.csv
//!
//! # Full analysis of one fund with a custom scenario grid
//! bondlens analyze bonds.csv --fund Fund_A --start -100 --end 100 --step 50
//!
//! # Machine-readable output
//! bondlens --format json analyze bonds.csv
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};
use config::Settings;
use output::RenderContext;

const VERBOSE_FILTER: &str = "warn,bondlens=debug,bondlens_math=debug,bondlens_analytics=debug,\
                              bondlens_portfolio=debug,bondlens_validation=debug";

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::new("warn")
        }
    });

    // stdout carries the report only
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;
    let ctx = RenderContext::new(cli.format, cli.precision);

    // Execute command
    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &settings, &ctx)?,
        Commands::Validate(args) => {
            if !commands::validate::execute(args, &settings, &ctx)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Funds(args) => commands::funds::execute(args, &settings, &ctx)?,
        Commands::Sample(args) => commands::sample::execute(args)?,
    }

    Ok(ExitCode::SUCCESS)
}
