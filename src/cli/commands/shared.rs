//! Shared components for CLI commands
//!
//! Logging setup, progress reporting and the small helpers both commands
//! need.

use crate::cli::args::ProcessArgs;
use crate::config::ProcessorConfig;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Set up structured logging at the given level
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hitran_processor={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build the run configuration from CLI arguments
pub fn build_configuration(args: &ProcessArgs) -> Result<ProcessorConfig> {
    let mut config = ProcessorConfig::new()
        .with_overwrite(args.overwrite)
        .with_allow_missing_refs(args.allow_missing_refs)
        .with_log_level(args.get_log_level());
    if let Some(path) = &args.reference_map {
        config = config.with_reference_map(path);
    }
    if let Some(path) = &args.states_seed {
        config = config.with_states_seed(path);
    }
    config.show_progress = args.show_progress();

    config.validate()?;
    Ok(config)
}

/// Count the lines of a file, so the progress bar gets a real total
pub fn count_records(path: &Path) -> Result<u64> {
    let file =
        File::open(path).map_err(|e| Error::io(format!("cannot open {}", path.display()), e))?;
    let mut count: u64 = 0;
    for line in BufReader::new(file).lines() {
        line.map_err(|e| Error::io(format!("read error in {}", path.display()), e))?;
        count += 1;
    }
    Ok(count)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}]")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_count_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.par");
        fs::write(&path, "one\ntwo\nthree\n").unwrap();
        assert_eq!(count_records(&path).unwrap(), 3);

        fs::write(&path, "").unwrap();
        assert_eq!(count_records(&path).unwrap(), 0);
    }

    #[test]
    fn test_build_configuration_applies_flags() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("lines.par");
        fs::write(&input, "").unwrap();

        let args = ProcessArgs {
            input,
            reference_map: None,
            states_seed: None,
            overwrite: true,
            allow_missing_refs: true,
            verbose: 1,
            quiet: false,
        };
        let config = build_configuration(&args).unwrap();
        assert!(config.overwrite);
        assert!(config.allow_missing_refs);
        assert_eq!(config.log_level, "info");
        assert!(config.show_progress);
    }

    #[test]
    fn test_build_configuration_rejects_missing_reference_map() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("lines.par");
        fs::write(&input, "").unwrap();

        let args = ProcessArgs {
            input,
            reference_map: Some(temp_dir.path().join("missing.csv")),
            states_seed: None,
            overwrite: false,
            allow_missing_refs: false,
            verbose: 0,
            quiet: false,
        };
        assert!(build_configuration(&args).is_err());
    }
}
