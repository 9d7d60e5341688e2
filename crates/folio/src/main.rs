//! Folio CLI - markdown posts to portable HTML.
//!
//! Provides commands for:
//! - `export`: Write one self-contained HTML file per post
//! - `bundle`: Write one directory bundle (HTML plus images) per post
//! - `render-diagrams`: Pre-render Mermaid blocks into post directories

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BundleArgs, ExportArgs, RenderDiagramsArgs};
use output::Output;

/// Folio - markdown posts to portable HTML.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export posts as single-file HTML with published image URLs.
    Export(ExportArgs),
    /// Build one relocatable directory bundle per post.
    Bundle(BundleArgs),
    /// Render Mermaid blocks to SVG files next to each post.
    RenderDiagrams(RenderDiagramsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Export(args) => args.execute(config),
        Commands::Bundle(args) => args.execute(config),
        Commands::RenderDiagrams(args) => args.execute(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
