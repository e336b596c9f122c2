//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Spread a metering period's consumption and spending over its months
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "consumption-allocator")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Input record (JSON)
    pub input: PathBuf,

    /// Seed for the value balancer
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Write the monthly table to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Use a published monthly fee by position, overriding the record's fee
    #[arg(long)]
    pub fee_choice: Option<usize>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
