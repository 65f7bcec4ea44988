//! LED Sphere Model Generator - headless CLI
//!
//! Reads a ring configuration and writes model files for lighting-control
//! software.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledsphere::cli::{CliResult, FormatsArgs, GenerateArgs, InspectArgs, ValidateArgs};
use ledsphere::constants::{APP_BINARY_NAME, APP_NAME};

/// LED Sphere Model Generator - ring layouts for xLights, MadMapper and Chromatik
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate model files
    Generate(GenerateArgs),
    /// Show the ring layout and port assignment
    Inspect(InspectArgs),
    /// Validate a configuration
    Validate(ValidateArgs),
    /// List supported output formats
    Formats(FormatsArgs),
}

fn run(command: &Command) -> CliResult<()> {
    match command {
        Command::Generate(args) => args.execute(),
        Command::Inspect(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Formats(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
