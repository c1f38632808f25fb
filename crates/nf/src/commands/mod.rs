//! Command implementations for the nf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod completions;
pub mod config;
pub mod feeds;
pub mod items;
pub mod search;

use std::path::PathBuf;

use newsfilter_core::{FeedStore, RssFeed};

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter parsing error.
    #[error("filter error: {0}")]
    Filter(#[from] newsfilter_core::filter::FilterError),

    /// Feed cache error.
    #[error("cache error: {0}")]
    Store(#[from] newsfilter_core::FeedStoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Feed cache path from `--cache`/`NF_CACHE` or the config file.
    pub cache_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are disabled by `--no-color`, by the `NO_COLOR` environment
    /// variable, or by `output.color = false` in the config file.
    pub fn from_cli(cli: &Cli, config: &config::Config) -> Self {
        let color_allowed = config.output.color.unwrap_or(true);
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && color_allowed,
            quiet: cli.quiet,
            verbose: cli.verbose,
            cache_path: cli.cache.clone().or_else(|| config.cache_file.clone()),
        }
    }

    /// Opens the feed cache at the configured path, or the XDG default.
    pub fn feed_store(&self) -> Result<FeedStore> {
        match &self.cache_path {
            Some(path) => Ok(FeedStore::with_path(path.clone())),
            None => Ok(FeedStore::new()?),
        }
    }

    /// Loads all feeds from the cache. A missing cache file yields no feeds.
    pub fn load_feeds(&self) -> Result<Vec<RssFeed>> {
        let store = self.feed_store()?;
        if self.verbose {
            eprintln!("Reading feeds from {}", store.path().display());
        }
        Ok(store.load_or_default()?)
    }
}
