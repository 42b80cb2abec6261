//! Validate command implementation
//!
//! Streams a `.par` file through the codec and round-trip validator without
//! writing any outputs. Failures are reported with their line numbers, up
//! to a configurable limit.

use super::shared::{count_records, create_progress_bar, setup_logging};
use crate::app::services::par_codec::ParCodec;
use crate::app::services::validator;
use crate::cli::args::ValidateArgs;
use crate::{Error, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{debug, info};

/// Counts from one validation pass
#[derive(Debug, Default)]
struct ValidationStats {
    records: usize,
    blank: usize,
    corrected: usize,
    failed: usize,
}

/// Validate command runner
pub fn run_validate(args: ValidateArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Validating {}", args.input.display());
    args.validate()?;

    let file = File::open(&args.input)
        .map_err(|e| Error::io(format!("cannot open {}", args.input.display()), e))?;
    let reader = BufReader::new(file);
    let codec = ParCodec::new();

    let progress = if args.show_progress() {
        let total = count_records(&args.input)?;
        Some(create_progress_bar(total, "validating"))
    } else {
        None
    };

    let mut stats = ValidationStats::default();
    let mut prev_nu: Option<f64> = None;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|e| Error::io(format!("read error at line {line_no}"), e))?;

        let outcome = check_line(&codec, &line, line_no, &mut prev_nu);
        match outcome {
            Ok(LineOutcome::Blank) => stats.blank += 1,
            Ok(LineOutcome::Clean) => stats.records += 1,
            Ok(LineOutcome::Corrected) => {
                stats.records += 1;
                stats.corrected += 1;
            }
            Err(e) => {
                stats.failed += 1;
                eprintln!("{} {}", "FAIL".red().bold(), e);
                if stats.failed >= args.max_failures {
                    eprintln!("stopping after {} failure(s)", stats.failed);
                    break;
                }
            }
        }
        if let Some(pb) = &progress {
            pb.set_position(line_no as u64);
        }
    }
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    if !args.quiet {
        print_summary(&stats);
    }
    debug!(?stats, "validation finished");

    if stats.failed > 0 {
        return Err(Error::configuration(format!(
            "{} record(s) failed validation",
            stats.failed
        )));
    }
    Ok(())
}

enum LineOutcome {
    Blank,
    Clean,
    Corrected,
}

fn check_line(
    codec: &ParCodec,
    line: &str,
    line_no: usize,
    prev_nu: &mut Option<f64>,
) -> Result<LineOutcome> {
    let Some(trans) = codec.decode(line, line_no)? else {
        return Ok(LineOutcome::Blank);
    };

    if let Some(prev) = *prev_nu {
        if trans.nu.val < prev {
            return Err(Error::ordering_violation(line_no, prev, trans.nu.val));
        }
    }
    *prev_nu = Some(trans.nu.val);

    let (_, correction) = validator::check(codec, trans)?;
    Ok(match correction {
        Some(_) => LineOutcome::Corrected,
        None => LineOutcome::Clean,
    })
}

fn print_summary(stats: &ValidationStats) {
    if stats.failed == 0 {
        println!(
            "{} {} record(s) valid, {} repaired, {} blank line(s) skipped",
            "OK".green().bold(),
            stats.records,
            stats.corrected,
            stats.blank
        );
    } else {
        println!(
            "{} {} record(s) failed, {} valid, {} repaired",
            "FAILED".red().bold(),
            stats.failed,
            stats.records,
            stats.corrected
        );
    }
}
