//! Descriptor generator
//!
//! Builds a [`MagidocConfig`] from the scalars a schema exposes plus any
//! explicit overrides. Overrides are applied after derivation and win.

use crate::config::{MagidocConfig, DEFAULT_TEMPLATE};
use crate::factories::FactoryRules;
use std::collections::BTreeMap;
use tracing::debug;

/// Builder for documentation descriptors
#[derive(Debug, Clone)]
pub struct MagidocGenerator {
    location: String,
    template: String,
    scalars: Vec<String>,
    overrides: BTreeMap<String, String>,
    rules: FactoryRules,
}

impl MagidocGenerator {
    /// Create a generator for the given introspection file location
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            template: DEFAULT_TEMPLATE.to_string(),
            scalars: Vec::new(),
            overrides: BTreeMap::new(),
            rules: FactoryRules::default(),
        }
    }

    /// Set the template
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Add a scalar name exposed by the schema
    pub fn with_scalar(mut self, scalar: impl Into<String>) -> Self {
        self.scalars.push(scalar.into());
        self
    }

    /// Add multiple scalar names
    pub fn with_scalars<I, S>(mut self, scalars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scalars.extend(scalars.into_iter().map(Into::into));
        self
    }

    /// Add an explicit factory override
    pub fn with_override(mut self, name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), placeholder.into());
        self
    }

    /// Add multiple overrides
    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Replace the derivation rules
    pub fn with_rules(mut self, rules: FactoryRules) -> Self {
        self.rules = rules;
        self
    }

    /// Produce the descriptor
    pub fn build(&self) -> MagidocConfig {
        let derived = self.rules.derive(&self.scalars);
        debug!(
            "Derived {} query generation factories from {} scalars",
            derived.len(),
            self.scalars.len()
        );

        MagidocConfig::new(self.location.clone())
            .with_template(self.template.clone())
            .with_factories(derived)
            .with_factories(self.overrides.clone())
    }
}
