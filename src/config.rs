//! Configuration file handling.
//!
//! This module provides loading and saving of deptrawl configuration
//! from a TOML file: the endpoint, token, git ref, and output paths all
//! live here instead of being compiled in.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/deptrawl/config.toml`
//! - macOS: `~/Library/Application Support/deptrawl/config.toml`
//! - Windows: `%APPDATA%\deptrawl\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! gitlab_url = "https://gitlab.com"
//! git_ref = "main"
//! concurrency = 4
//! default_format = "table"
//! search_term = "internal-hostname"
//!
//! [outputs]
//! deps_json = "gitlab_libraries.json"
//! deps_csv = "gitlab_libraries.csv"
//! ```
//!
//! The API token is read from the `token` key, or preferably from the
//! `GITLAB_TOKEN` environment variable so it never lands in a file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the GitLab instance.
    ///
    /// Default: `https://gitlab.com`
    pub gitlab_url: String,

    /// API token sent as the `PRIVATE-TOKEN` header.
    ///
    /// Optional; public projects are reachable without one. The
    /// `GITLAB_TOKEN` environment variable takes precedence.
    pub token: Option<String>,

    /// Git ref used when fetching repository files.
    ///
    /// Default: `main`
    pub git_ref: String,

    /// How many projects to extract concurrently. `1` means sequential.
    ///
    /// Default: 4
    pub concurrency: usize,

    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json"
    /// Default: "table"
    pub default_format: String,

    /// Default keyword for the `search` subcommand.
    pub search_term: Option<String>,

    /// Artifact paths for each subcommand.
    #[serde(default)]
    pub outputs: OutputPaths,
}

/// Output artifact paths; every run writes a JSON and a CSV artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub deps_json: PathBuf,
    pub deps_csv: PathBuf,
    pub search_json: PathBuf,
    pub search_csv: PathBuf,
    pub cpe_json: PathBuf,
    pub cpe_csv: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            deps_json: PathBuf::from("gitlab_libraries.json"),
            deps_csv: PathBuf::from("gitlab_libraries.csv"),
            search_json: PathBuf::from("gitlab_global_search_results.json"),
            search_csv: PathBuf::from("gitlab_global_search_results.csv"),
            cpe_json: PathBuf::from("cpe_data.json"),
            cpe_csv: PathBuf::from("cpe_data.csv"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gitlab_url: "https://gitlab.com".to_string(),
            token: None,
            git_ref: "main".to_string(),
            concurrency: 4,
            default_format: "table".to_string(),
            search_term: None,
            outputs: OutputPaths::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("deptrawl")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Resolves the API token: CLI flag, then `GITLAB_TOKEN` environment
    /// variable, then the config file.
    pub fn resolve_token(&self, cli_token: Option<String>) -> Option<String> {
        cli_token
            .or_else(|| std::env::var("GITLAB_TOKEN").ok())
            .or_else(|| self.token.clone())
    }
}
