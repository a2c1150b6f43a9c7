//! Settings loader for magidoc-gen
//!
//! Implements single-source priority loading with environment overrides:
//! 1. --config file (highest priority)
//! 2. Current working directory: ./magidoc-gen.toml or ./magidoc-gen.json
//! 3. No file, defaults only
//!
//! `MAGIDOC_GEN_*` environment variables are layered on top of whichever file
//! was found. Command-line flags are applied last by the commands themselves.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// File names searched in the working directory, in order
pub const SETTINGS_FILE_NAMES: [&str; 2] = ["magidoc-gen.toml", "magidoc-gen.json"];

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "MAGIDOC_GEN";

/// Defaults for the `generate` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenSettings {
    /// Template name
    pub template: Option<String>,
    /// Introspection file location written into the descriptor
    pub schema_location: Option<String>,
    /// Descriptor output path
    pub out: Option<PathBuf>,
    /// Scalar names used to derive factories
    pub scalars: Vec<String>,
    /// Explicit factory overrides
    pub factories: BTreeMap<String, String>,
}

/// CLI settings loader
pub struct CliConfigLoader {
    /// Override settings file path
    config_override: Option<PathBuf>,
    /// Directory searched for settings files
    search_dir: Option<PathBuf>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            search_dir: None,
        }
    }

    /// Set settings file override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set the directory searched for settings files
    #[cfg(test)]
    pub fn with_search_dir(mut self, dir: PathBuf) -> Self {
        self.search_dir = Some(dir);
        self
    }

    /// Load and merge settings
    pub fn load(&self) -> Result<GenSettings> {
        let mut builder = config::Config::builder();

        if let Some(path) = self.find_settings_file()? {
            debug!("Loading settings from {}", path.display());
            builder = builder.add_source(config::File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("scalars"),
        );

        let settings = builder
            .build()
            .context("Failed to build settings")?
            .try_deserialize::<GenSettings>()
            .context("Invalid settings")?;

        Ok(settings)
    }

    /// Resolve which settings file to read, if any
    fn find_settings_file(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.config_override {
            if !path.exists() {
                bail!("Settings file not found: {}", path.display());
            }
            return Ok(Some(path.clone()));
        }

        let dir = match &self.search_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        Ok(SETTINGS_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists()))
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
