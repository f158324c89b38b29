use clap::Parser;
use hinode_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Run the main command, aborting the whole run on Ctrl+C. Workers
        // are dropped between stations, never mid-file thanks to the
        // writer's atomic publish.
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(hinode_processor::Error::interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Hinode Processor - JMA Sunrise/Sunset and Tide Data Generator");
    println!("=============================================================");
    println!();
    println!("Generate one year of daily sunrise/sunset times per observation station");
    println!("and download the matching tide prediction tables from the JMA data service.");
    println!();
    println!("USAGE:");
    println!("    hinode-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    generate    Generate sunrise/sunset files and download tide data (main command)");
    println!("    sunrise     Generate sunrise/sunset files only");
    println!("    tide        Download tide prediction tables only");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Build the full data tree for 2024 (data_2024/hinode, data_2024/tide):");
    println!("    hinode-processor generate 2024");
    println!();
    println!("    # Prompt for the year interactively:");
    println!("    hinode-processor generate");
    println!();
    println!("    # Sunrise files only, custom registry and output:");
    println!("    hinode-processor sunrise 2024 --stations keisai.tsv --output /data/2024");
    println!();
    println!("For detailed help on any command, use:");
    println!("    hinode-processor <COMMAND> --help");
}
