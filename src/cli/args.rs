//! Command-line argument definitions for the HITRAN processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the HITRAN line-list processor
///
/// Normalizes HITRAN2004+ `.par` line lists into deduplicated state and
/// transition tables suitable for loading into a relational database.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hitran-processor",
    version,
    about = "Normalize HITRAN2004+ .par line lists into state and transition tables",
    long_about = "Decodes the fixed-width 160-column .par transition record, parses the \
                  quantum-number fields with per-molecular-class grammars, proves every \
                  record survives a byte-exact round trip, deduplicates the quantum states \
                  it mentions, and writes .states, .trans and .corrections files next to \
                  the input."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the HITRAN processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Normalize a .par line list into state and transition tables
    Process(ProcessArgs),
    /// Check that every record of a .par file decodes and round-trips
    Validate(ValidateArgs),
}

/// Arguments for the process command (main normalization)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input .par line list
    ///
    /// A HITRAN2004+ fixed-width transition file, one 160-column record per
    /// line, ordered by ascending wavenumber. Output files are written next
    /// to it, named from its stem and modification date.
    #[arg(value_name = "PAR_FILE", help = "Input .par line list")]
    pub input: PathBuf,

    /// Reference-map CSV file
    ///
    /// Maps `<formula>-<slot>-<ref_id>` keys to persisted source identities.
    /// Without it every non-zero reference is reported as missing.
    #[arg(
        short = 'r',
        long = "references",
        value_name = "FILE",
        help = "Reference-map CSV (key,source_id)"
    )]
    pub reference_map: Option<PathBuf>,

    /// Existing states file to seed the registry from
    ///
    /// States already present keep their identities and newly interned
    /// states are numbered above them.
    #[arg(
        short = 's',
        long = "states",
        value_name = "FILE",
        help = "Existing states file to seed identities from"
    )]
    pub states_seed: Option<PathBuf>,

    /// Replace existing output files
    ///
    /// By default the processor refuses to clobber output files left by an
    /// earlier run on the same input.
    #[arg(long = "overwrite", help = "Replace existing output files")]
    pub overwrite: bool,

    /// Report unresolved parameter references without failing
    ///
    /// By default a run that ends with unresolved references is an error.
    /// This flag downgrades them to a warning listing the missing keys.
    #[arg(
        long = "allow-missing-refs",
        help = "Warn about unresolved references instead of failing"
    )]
    pub allow_missing_refs: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the validate command (round-trip checking only)
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input .par line list to check
    #[arg(value_name = "PAR_FILE", help = "Input .par line list")]
    pub input: PathBuf,

    /// Maximum number of failures to report before stopping
    #[arg(
        long = "max-failures",
        value_name = "COUNT",
        default_value_t = 10,
        help = "Stop after this many failed records"
    )]
    pub max_failures: usize,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.input.display()
            )));
        }

        if let Some(reference_map) = &self.reference_map {
            if !reference_map.exists() {
                return Err(Error::configuration(format!(
                    "Reference map does not exist: {}",
                    reference_map.display()
                )));
            }
        }

        if let Some(states_seed) = &self.states_seed {
            if !states_seed.exists() {
                return Err(Error::configuration(format!(
                    "States seed file does not exist: {}",
                    states_seed.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        if self.max_failures == 0 {
            return Err(Error::configuration(
                "Maximum failure count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
