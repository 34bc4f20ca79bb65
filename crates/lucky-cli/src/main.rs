//! # lucky CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use anyhow::bail;
use clap::Parser;

/// lucky — JSON Schema generation from request-body validators.
///
/// Reads a serverless-style project file, derives a JSON-Schema-like
/// artifact per bound endpoint, and registers each artifact in the
/// project's documentation models.
#[derive(Parser, Debug)]
#[command(name = "lucky", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Derive schemas and reconcile output files and documentation models.
    Generate(lucky_cli::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let report = lucky_cli::generate::run(&args)?;
            if report.has_errors() {
                bail!("schema generation completed with errors");
            }
        }
    }

    Ok(())
}
