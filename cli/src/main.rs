//! Command-line front end for the consumption allocator
//!
//! Reads an input record as JSON, runs the engine, prints the monthly table
//! and optionally exports it as CSV.

mod args;
mod error;
mod export;
mod report;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use consumption_allocator_core_rs::models::input::CANONICAL_MONTHLY_FEES;
use consumption_allocator_core_rs::{AllocationEngine, EngineConfig, InputRecord, MonthlyFee};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::args::CliArgs;
use crate::error::CliError;
use crate::report::Report;

/// Replace the record's fee with the published fee at `choice`
fn apply_fee_choice(input: &mut InputRecord, choice: Option<usize>) -> Result<(), CliError> {
    if let Some(index) = choice {
        let fee = MonthlyFee::canonical(index).ok_or(CliError::FeeChoice {
            index,
            count: CANONICAL_MONTHLY_FEES.len(),
        })?;
        input.monthly_fee = fee.amount();
    }
    Ok(())
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let raw = fs::read_to_string(&args.input)?;
    let mut input: InputRecord = serde_json::from_str(&raw)?;
    apply_fee_choice(&mut input, args.fee_choice)?;

    let engine = AllocationEngine::new(EngineConfig::with_seed(args.seed))?;
    let result = engine.run(&input)?;

    print!("{}", Report(&result));

    if let Some(path) = &args.csv {
        export::write_rows(path, &result.rows)?;
        println!("Exported {} rows to '{}'", result.rows.len(), path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use consumption_allocator_core_rs::TotalizerReading;

    fn input() -> InputRecord {
        InputRecord {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            start_reading: TotalizerReading::default(),
            end_reading: TotalizerReading::default(),
            topup1_net: 0.0,
            topup2_net: 0.0,
            first_tier_price: 2.50,
            second_tier_price: 0.0,
            third_tier_price: 0.0,
            stamp_rate: 0.036,
            monthly_fee: 6.20,
            zero_tail: 0,
        }
    }

    #[test]
    fn test_fee_choice_overrides_record_fee() {
        let mut record = input();
        apply_fee_choice(&mut record, Some(3)).unwrap();
        assert_eq!(record.monthly_fee, 13.68);
    }

    #[test]
    fn test_no_fee_choice_keeps_record_fee() {
        let mut record = input();
        apply_fee_choice(&mut record, None).unwrap();
        assert_eq!(record.monthly_fee, 6.20);
    }

    #[test]
    fn test_out_of_range_fee_choice_rejected() {
        let mut record = input();
        assert!(matches!(
            apply_fee_choice(&mut record, Some(7)),
            Err(CliError::FeeChoice { index: 7, count: 7 })
        ));
    }
}
