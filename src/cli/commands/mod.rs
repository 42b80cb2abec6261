//! Command implementations for the HITRAN processor CLI
//!
//! This module contains the main command execution logic, progress reporting,
//! and error handling for the CLI interface. Each command is implemented in
//! its own module.

pub mod process;
pub mod shared;
pub mod validate;

use crate::Result;
use crate::cli::args::Commands;

/// Main command runner for the HITRAN processor
///
/// Dispatches to the appropriate subcommand handler:
/// - `process`: full normalization writing .states, .trans and .corrections
/// - `validate`: decode and round-trip every record without writing outputs
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Process(process_args) => process::run_process(process_args),
        Commands::Validate(validate_args) => validate::run_validate(validate_args),
    }
}
