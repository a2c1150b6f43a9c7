//! Descriptor file formats
//!
//! The generator loads an ES module (`magidoc.mjs`) whose default export is the
//! descriptor object. A JSON mirror is supported for tooling that prefers it.

pub mod mjs;
pub mod parser;

use crate::config::MagidocConfig;
use crate::error::{ConfigError, Result};
use std::path::Path;

pub use mjs::render_mjs;
pub use parser::parse_mjs;

/// On-disk representation of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// ES module with a default-exported object literal
    Mjs,
    /// Plain JSON document
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("mjs") | Some("js") => Ok(ConfigFormat::Mjs),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into()),
        }
    }

    /// Render a descriptor in this format
    pub fn render(&self, config: &MagidocConfig) -> Result<String> {
        match self {
            ConfigFormat::Mjs => render_mjs(config),
            ConfigFormat::Json => render_json(config),
        }
    }

    /// Parse a descriptor in this format
    pub fn parse(&self, source: &str) -> Result<MagidocConfig> {
        match self {
            ConfigFormat::Mjs => parse_mjs(source),
            ConfigFormat::Json => parse_json(source),
        }
    }
}

/// Render a descriptor as pretty JSON
pub fn render_json(config: &MagidocConfig) -> Result<String> {
    let mut content = serde_json::to_string_pretty(config)?;
    content.push('\n');
    Ok(content)
}

/// Parse a JSON descriptor
pub fn parse_json(source: &str) -> Result<MagidocConfig> {
    Ok(serde_json::from_str(source)?)
}
