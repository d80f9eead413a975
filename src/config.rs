// ABOUTME: Configuration for the postpub CLI
// ABOUTME: Resolves API base URL and bearer token from flags, environment, config file and defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const API_BASE_VAR: &str = "API_BASE";
pub const API_TOKEN_VAR: &str = "API_TOKEN";

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";
/// Placeholder, not a real credential
pub const DEFAULT_API_TOKEN: &str = "your-api-token-here";
pub const DEFAULT_CATEGORY: &str = "日常";

/// Get the XDG config directory for postpub
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("postpub");
    Ok(config_dir)
}

/// Path of the optional config file
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// Optional on-disk settings, consulted after the environment
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    pub api_base: Option<String>,
    pub api_token: Option<String>,
}

impl FileConfig {
    /// Load the config file, or an empty config if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }
}

/// Values given on the command line, ahead of every other layer
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub api_token: Option<String>,
}

/// Resolved connection settings for the posts API
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub api_token: String,
}

impl Settings {
    /// Environment over defaults. Read at call time, no config file.
    pub fn from_env() -> Result<Self> {
        Self::resolve(env_lookup, &FileConfig::default())
    }

    /// Flags over environment over config file over defaults
    pub fn load_with(overrides: &Overrides) -> Result<Self> {
        let file = FileConfig::load()?;
        Self::resolve_with(overrides, env_lookup, &file)
    }

    pub fn resolve<F>(lookup: F, file: &FileConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve_with(&Overrides::default(), lookup, file)
    }

    /// Pick each value from the first layer that sets it, then validate the winner.
    ///
    /// Empty values count as unset at every layer.
    pub fn resolve_with<F>(overrides: &Overrides, lookup: F, file: &FileConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = non_empty(overrides.api_base.clone())
            .or_else(|| non_empty(lookup(API_BASE_VAR)))
            .or_else(|| non_empty(file.api_base.clone()))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_token = non_empty(overrides.api_token.clone())
            .or_else(|| non_empty(lookup(API_TOKEN_VAR)))
            .or_else(|| non_empty(file.api_token.clone()))
            .unwrap_or_else(|| DEFAULT_API_TOKEN.to_string());

        Self::new(api_base, api_token)
    }

    pub fn new(api_base: String, api_token: String) -> Result<Self> {
        Url::parse(&api_base).with_context(|| format!("Invalid API base URL: {}", api_base))?;
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn posts_endpoint(&self) -> String {
        format!("{}/api/posts", self.api_base)
    }

    pub fn uses_default_token(&self) -> bool {
        self.api_token == DEFAULT_API_TOKEN
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Mask a token for display, keeping only the last four characters
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
