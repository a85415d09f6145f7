//! Table guide CLI.
//!
//! Provides commands for:
//! - `generate`: Request a guide for a table and write it as HTML, JSON or markdown
//! - `examples`: List the example tables offered by the backend

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExamplesArgs, GenerateArgs};
use error::CliError;
use output::Output;

/// Table guide generator.
#[derive(Parser)]
#[command(name = "tg", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a guide for a table.
    Generate(GenerateArgs),
    /// List example tables.
    Examples(ExamplesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Generate(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.failure(&err);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    // Guide requests run as tasks on a single thread; blocking HTTP calls are
    // moved to the runtime's blocking pool.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    match command {
        Commands::Generate(args) => rt.block_on(args.execute()),
        Commands::Examples(args) => rt.block_on(args.execute()),
    }
}
