use clap::Parser;
use hitran_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.get_command() else {
        show_help_and_commands();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(()) => {
            // Success - results have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", anyhow::Error::from(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("HITRAN Processor - Line-List Normalizer");
    println!("=======================================");
    println!();
    println!("Normalize HITRAN2004+ .par line lists into deduplicated state and");
    println!("transition tables suitable for loading into a relational database.");
    println!();
    println!("USAGE:");
    println!("    hitran_processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Normalize a .par file into .states/.trans/.corrections");
    println!("    validate    Check that every record decodes and round-trips");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Normalize a line list with a reference map:");
    println!("    hitran_processor process CO2.par --references refs.csv");
    println!();
    println!("    # Continue state numbering from an earlier run:");
    println!("    hitran_processor process H2O.par --states H2O.2026-01-15.states");
    println!();
    println!("    # Check a file without writing outputs:");
    println!("    hitran_processor validate CH4.par");
    println!();
    println!("For detailed help on any command, use:");
    println!("    hitran_processor <COMMAND> --help");
}
