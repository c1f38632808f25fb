//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/nf/config.toml.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use newsfilter_core::filter::FilterParser;
use serde::{Deserialize, Deserializer, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Prefix of config keys that name saved filters.
const FILTERS_PREFIX: &str = "filters.";

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Feed cache file (default: ~/.cache/nf/feeds.json).
    /// A leading `~/` is expanded to the home directory.
    #[serde(
        default,
        deserialize_with = "deserialize_home_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_file: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Saved filter queries by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            cache_file: None,
            output: OutputConfig::default(),
            filters: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Returns the saved filter called `name`.
    pub fn saved_filter(&self, name: &str) -> Result<&str> {
        self.filters.get(name).map(String::as_str).ok_or_else(|| {
            let known: Vec<&str> = self.filters.keys().map(String::as_str).collect();
            let hint = if known.is_empty() {
                "no filters are saved".to_string()
            } else {
                format!("saved filters: {}", known.join(", "))
            };
            CommandError::Config(format!("Unknown saved filter '{name}' ({hint})"))
        })
    }
}

/// Expands a leading `~` component to the user's home directory.
///
/// `~user/...` forms are left alone, as is everything when no home
/// directory can be determined.
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

fn deserialize_home_path<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = Option::<PathBuf>::deserialize(deserializer)?;
    Ok(path.as_deref().map(expand_home))
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/nf/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("nf"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("nf"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("NF_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version < CONFIG_VERSION {
        tracing::debug!(from = config.version, to = CONFIG_VERSION, "migrating config");
    }
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref cache_file) = config.cache_file {
                println!("  cache_file: {}", cache_file.display());
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }

            println!("\n[filters]");
            for (name, query) in &config.filters {
                println!("  {}: {}", name, query);
            }
        } else {
            println!("(No config file exists. Run 'nf config set <key> <value>' to create one.)");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies a key/value pair to a config.
///
/// Saved filters are parsed before they are stored, so a config file never
/// holds a query that `nf items --saved` would reject.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    if let Some(name) = key.strip_prefix(FILTERS_PREFIX) {
        if name.is_empty() {
            return Err(CommandError::Config(
                "Saved filter name must not be empty".to_string(),
            ));
        }
        FilterParser::parse(value)?;
        config.filters.insert(name.to_string(), value.to_string());
        return Ok(());
    }

    match key {
        "cache_file" => {
            config.cache_file = Some(expand_home(Path::new(value)));
        }
        "output.color" => {
            config.output.color = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: cache_file, output.color, filters.<name>",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config unset command.
pub fn execute_unset(ctx: &CommandContext, key: &str) -> Result<()> {
    let name = key.strip_prefix(FILTERS_PREFIX).ok_or_else(|| {
        CommandError::Config(format!(
            "Cannot unset '{}'. Only filters.<name> keys can be removed",
            key
        ))
    })?;

    let mut config = load_config()?;
    if config.filters.remove(name).is_none() {
        return Err(CommandError::Config(format!("No saved filter named '{name}'")));
    }
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": key,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Removed {}", key);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
