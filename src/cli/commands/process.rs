//! Process command implementation
//!
//! Runs the full normalization: decode, validate, resolve, deduplicate and
//! write the three output files, with progress reporting and a final
//! summary.

use super::shared::{build_configuration, count_records, create_progress_bar, setup_logging};
use crate::app::services::normalizer::{NormalizeSummary, Normalizer};
use crate::app::services::reference_resolver::TableResolver;
use crate::cli::args::ProcessArgs;
use crate::Result;
use colored::Colorize;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info};

/// Process command runner
///
/// 1. Set up logging and build the run configuration
/// 2. Load the reference map if one was given
/// 3. Stream the input through the normalizer with progress reporting
/// 4. Print the output paths and counts
pub fn run_process(args: ProcessArgs) -> Result<()> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting HITRAN processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = build_configuration(&args)?;

    let resolver = match &config.reference_map {
        Some(path) => TableResolver::from_csv(path)?,
        None => TableResolver::new(),
    };
    if resolver.is_empty() {
        info!("No reference map loaded; only reference 0 will resolve");
    }

    let progress = if config.show_progress {
        let total = count_records(&args.input)?;
        Some(create_progress_bar(total, "normalizing"))
    } else {
        None
    };

    let normalizer = Normalizer::new(resolver);
    let result = normalizer.run(&args.input, &config.normalize_options(), |line_no| {
        if let Some(pb) = &progress {
            pb.set_position(line_no as u64);
        }
    });
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let summary = result?;

    if !args.quiet {
        print_summary(&summary, start_time.elapsed());
    }
    Ok(())
}

fn print_summary(summary: &NormalizeSummary, elapsed: std::time::Duration) {
    println!(
        "{} {} transitions, {} new states in {}",
        "Normalized".green().bold(),
        summary.transitions,
        summary.new_states,
        HumanDuration(elapsed)
    );
    if summary.corrections > 0 {
        println!(
            "{} {} record(s) repaired by the correction table",
            "Repaired".yellow().bold(),
            summary.corrections
        );
    }
    if summary.missing_references > 0 {
        println!(
            "{} {} parameter reference(s) unresolved",
            "Warning".yellow().bold(),
            summary.missing_references
        );
    }
    println!("  states:      {}", summary.outputs.states.display());
    println!("  transitions: {}", summary.outputs.trans.display());
    println!("  corrections: {}", summary.outputs.corrections.display());
}
