//! Command dispatch module for routing CLI commands to their handlers.

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::items::ItemsOptions;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that can be executed.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// A command routed from the parsed CLI.
pub enum Dispatch<'a> {
    Check(&'a str),
    Items(ItemsOptions),
    Feeds(Option<&'a str>),
    Search {
        phrase: &'a str,
        feed: Option<&'a str>,
    },
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> Dispatch<'a> {
    /// Routes the parsed CLI to a command.
    pub fn from_cli(cli: &'a Cli) -> Self {
        match &cli.command {
            Some(Commands::Check { query }) => Self::Check(query),
            Some(Commands::Items {
                filter,
                saved,
                feed,
                unread,
                limit,
                all,
            }) => Self::Items(ItemsOptions {
                filter: filter.clone(),
                saved: saved.clone(),
                feed: feed.clone(),
                unread: *unread,
                limit: *limit,
                all: *all,
            }),
            Some(Commands::Feeds { filter }) => Self::Feeds(filter.as_deref()),
            Some(Commands::Search { phrase, feed }) => Self::Search {
                phrase,
                feed: feed.as_deref(),
            },
            Some(Commands::Config { command }) => Self::Config(command),
            Some(Commands::Completions { shell }) => Self::Completions(shell),
            None => Self::Help,
        }
    }
}

impl Command for Dispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Check(query) => commands::check::execute(ctx, query),
            Self::Items(opts) => commands::items::execute(ctx, opts),
            Self::Feeds(filter) => commands::feeds::execute(ctx, *filter),
            Self::Search { phrase, feed } => commands::search::execute(ctx, phrase, *feed),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("nf - newsfilter query tool");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Unset { key }) => commands::config::execute_unset(ctx, key),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}
