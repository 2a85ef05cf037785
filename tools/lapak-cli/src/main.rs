//! Lapak CLI - developer tool for the marketplace catalog core.
//!
//! Commands:
//! - `lapak variants generate` - Print the combination table of a listing file
//! - `lapak variants resolve` - Resolve a buyer selection to price and stock
//! - `lapak variants author` - Build a listing file interactively
//! - `lapak recommend` - Run the recommendation selector over a catalog file
//! - `lapak config` - Show or initialize configuration

mod commands;
mod config;
mod context;
mod listing;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, RecommendArgs, VariantsArgs};

/// Lapak CLI - author variant listings and inspect recommendations
#[derive(Parser)]
#[command(name = "lapak")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (debug logs)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, resolve and author product variants
    Variants(VariantsArgs),

    /// Pick recommendations for a viewer from a catalog file
    Recommend(RecommendArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Variants(args) => commands::variants::run(args, &ctx),
        Commands::Recommend(args) => commands::recommend::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
