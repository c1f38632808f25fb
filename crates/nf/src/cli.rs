//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the nf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// nf - Filter and search a newsfilter feed cache
#[derive(Parser, Debug)]
#[command(name = "nf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Feed cache file (default: from config, then ~/.cache/nf/feeds.json)
    #[arg(long, global = true, env = "NF_CACHE")]
    pub cache: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a filter expression and show how it is understood
    #[command(alias = "c")]
    Check {
        /// Filter expression (e.g., 'unread = "yes" and title =~ "rust"')
        query: String,
    },

    /// List items, optionally filtered
    #[command(alias = "l")]
    Items {
        /// Filter expression
        #[arg(short, long, conflicts_with = "saved")]
        filter: Option<String>,

        /// Use a filter saved in the config file
        #[arg(short, long)]
        saved: Option<String>,

        /// Only items of the feed with this URL
        #[arg(long)]
        feed: Option<String>,

        /// Show only unread items
        #[arg(short, long)]
        unread: bool,

        /// Limit results (default: 50)
        #[arg(long, default_value = "50")]
        limit: usize,

        /// Show all items (no limit)
        #[arg(long)]
        all: bool,
    },

    /// List feeds, optionally filtered by feed attributes
    Feeds {
        /// Filter expression over feed attributes
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Search item titles and contents for a phrase
    #[command(alias = "s")]
    Search {
        /// Phrase to search for (case-insensitive, literal)
        phrase: String,

        /// Only search the feed with this URL
        #[arg(long)]
        feed: Option<String>,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., output.color, filters.unread)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Remove a saved filter
    Unset {
        /// Configuration key (only filters.<name> can be removed)
        key: String,
    },

    /// Print config file path
    Path,
}
