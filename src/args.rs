use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for meteo
#[derive(Debug, Parser)]
#[command(
    name = "meteo",
    version,
    about = "Current weather for Spanish provinces"
)]
pub struct CliArgs {
    /// Path to the config file (default: <config_dir>/meteo/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all provinces
    Provinces,

    /// Show the current weather in a province's capital
    Weather {
        /// Province slug (e.g. madrid, a-coruna)
        slug: String,
    },

    /// Read province slugs from stdin, one lookup per line
    Browse,

    /// Show recently viewed provinces
    Recents {
        /// Erase the history instead of showing it
        #[arg(long)]
        clear: bool,
    },

    /// Show or edit favorite provinces
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// Add the province if absent, remove it otherwise
    Toggle {
        /// Province slug
        slug: String,
    },

    /// Remove every favorite
    Clear,
}
