//! CLI command implementations.

pub mod config;
pub mod recommend;
pub mod variants;

use clap::{Args, Subcommand};

/// Arguments for the variants command.
#[derive(Args)]
pub struct VariantsArgs {
    #[command(subcommand)]
    pub command: VariantsCommand,
}

#[derive(Subcommand)]
pub enum VariantsCommand {
    /// Print the combination table of a listing file
    Generate {
        /// Listing file (.toml or .json).
        file: String,

        /// Print the product creation payload instead of the table.
        #[arg(long)]
        payload: bool,
    },

    /// Resolve a buyer selection to price and stock
    Resolve {
        /// Listing file (.toml or .json).
        file: String,

        /// Selected option as Type=Value, repeatable.
        #[arg(short, long = "select", value_name = "TYPE=VALUE")]
        select: Vec<String>,
    },

    /// Build a listing file interactively
    Author {
        /// Where to write the listing.
        #[arg(short, long, default_value = "listing.toml")]
        output: String,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the recommend command.
#[derive(Args)]
pub struct RecommendArgs {
    /// Catalog file with `categories` and `products` (JSON).
    #[arg(long)]
    pub catalog: String,

    /// Browsing history file keyed by user id (JSON).
    #[arg(long)]
    pub history: Option<String>,

    /// Viewer user id. Omit for an anonymous visitor.
    #[arg(long)]
    pub viewer: Option<String>,

    /// Number of products (default: recommendations.default_limit).
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new lapak.toml in the current directory
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
