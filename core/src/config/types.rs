//! Descriptor types consumed by the documentation generator
//!
//! A descriptor is plain data. Nothing here touches the filesystem; callers
//! that want structural guarantees opt into [`MagidocConfig::validate`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Template used when none is given
pub const DEFAULT_TEMPLATE: &str = "carbon-multi-page";

/// Where the generator finds the introspection schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IntrospectionSource {
    /// Pre-fetched introspection file, relative to the descriptor
    File { location: String },
}

impl IntrospectionSource {
    /// Create a file source
    pub fn file(location: impl Into<String>) -> Self {
        IntrospectionSource::File {
            location: location.into(),
        }
    }

    /// Get the discriminant as written in the descriptor
    pub fn kind(&self) -> &'static str {
        match self {
            IntrospectionSource::File { .. } => "file",
        }
    }

    /// Get the raw location string
    pub fn location(&self) -> &str {
        match self {
            IntrospectionSource::File { location } => location,
        }
    }

    /// Resolve the location against the directory holding `config_path`
    pub fn resolve<P: AsRef<Path>>(&self, config_path: P) -> PathBuf {
        let base = config_path.as_ref().parent().unwrap_or_else(|| Path::new(""));
        base.join(self.location())
    }
}

/// Rendering options passed through to the template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WebsiteOptions {
    /// Scalar/type name to placeholder used in generated example queries
    #[serde(default)]
    pub query_generation_factories: BTreeMap<String, String>,
}

/// Website section of a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebsiteConfig {
    /// Template name recognized by the generator
    pub template: String,
    #[serde(default)]
    pub options: WebsiteOptions,
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            options: WebsiteOptions::default(),
        }
    }
}

/// A complete documentation descriptor
///
/// Keys the model cannot represent are rejected rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MagidocConfig {
    pub introspection: IntrospectionSource,
    pub website: WebsiteConfig,
}

impl MagidocConfig {
    /// Create a descriptor pointing at an introspection file, with the default template
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            introspection: IntrospectionSource::file(location),
            website: WebsiteConfig::default(),
        }
    }

    /// Set the template
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.website.template = template.into();
        self
    }

    /// Add a query generation factory; an existing entry for `name` is replaced
    pub fn with_factory(mut self, name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.website
            .options
            .query_generation_factories
            .insert(name.into(), placeholder.into());
        self
    }

    /// Add multiple factories
    pub fn with_factories<I, K, V>(mut self, factories: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.website.options.query_generation_factories.extend(
            factories
                .into_iter()
                .map(|(name, placeholder)| (name.into(), placeholder.into())),
        );
        self
    }

    /// Get the factory mapping
    pub fn factories(&self) -> &BTreeMap<String, String> {
        &self.website.options.query_generation_factories
    }

    /// Check the structural properties the generator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.introspection.location().trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "introspection.location".to_string(),
            });
        }

        if self.website.template.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "website.template".to_string(),
            });
        }

        // Placeholders may be empty, names may not
        if self.factories().keys().any(|name| name.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "website.options.queryGenerationFactories".to_string(),
                value: "empty type name".to_string(),
            });
        }

        Ok(())
    }
}
