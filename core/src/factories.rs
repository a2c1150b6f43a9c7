//! Query generation factory derivation
//!
//! Scalars produced by reflecting over collection types are named with a
//! prefix describing their shape (`goslice_string`, `gomap_string_string`).
//! The generator cannot synthesize example values for them, so each gets a
//! literal placeholder chosen by prefix.

use std::collections::BTreeMap;

/// Placeholder for list-shaped scalars
pub const ARRAY_PLACEHOLDER: &str = "[]";

/// Placeholder for map-shaped scalars
pub const MAP_PLACEHOLDER: &str = "{}";

/// Scalars that always get an empty-string placeholder
pub const BASE_FACTORIES: [&str; 2] = ["RawString", "GoStringer"];

/// Prefix to placeholder table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryRules {
    base: Vec<(String, String)>,
    prefixes: Vec<(String, String)>,
}

impl FactoryRules {
    /// Create a rule table with no base entries and no prefixes
    pub fn empty() -> Self {
        Self {
            base: Vec::new(),
            prefixes: Vec::new(),
        }
    }

    /// Add a base factory emitted for every descriptor
    pub fn with_base(mut self, name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.base.push((name.into(), placeholder.into()));
        self
    }

    /// Add a prefix rule; earlier rules take precedence
    pub fn with_prefix(mut self, prefix: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.prefixes.push((prefix.into(), placeholder.into()));
        self
    }

    /// Get the placeholder for a scalar name, if any rule matches
    pub fn placeholder_for(&self, scalar: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(prefix, _)| scalar.starts_with(prefix.as_str()))
            .map(|(_, placeholder)| placeholder.as_str())
    }

    /// Derive the factory mapping for a set of scalar names
    pub fn derive<I, S>(&self, scalars: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut factories: BTreeMap<String, String> = self.base.iter().cloned().collect();

        for scalar in scalars {
            let scalar = scalar.as_ref();
            match self.placeholder_for(scalar) {
                Some(placeholder) => {
                    factories.insert(scalar.to_string(), placeholder.to_string());
                }
                None => tracing::trace!("No factory rule for scalar {}", scalar),
            }
        }

        factories
    }
}

impl Default for FactoryRules {
    fn default() -> Self {
        let rules = BASE_FACTORIES
            .iter()
            .fold(Self::empty(), |rules, name| rules.with_base(*name, ""));

        rules
            .with_prefix("goarray_", ARRAY_PLACEHOLDER)
            .with_prefix("goslice_", ARRAY_PLACEHOLDER)
            .with_prefix("gomap_", MAP_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_by_prefix() {
        let rules = FactoryRules::default();

        assert_eq!(rules.placeholder_for("goarray_string"), Some("[]"));
        assert_eq!(rules.placeholder_for("goslice_int"), Some("[]"));
        assert_eq!(rules.placeholder_for("gomap_string_interface"), Some("{}"));
        assert_eq!(rules.placeholder_for("Time"), None);
        // Prefixes are case sensitive
        assert_eq!(rules.placeholder_for("GoMap"), None);
    }

    #[test]
    fn test_derive_includes_base_factories() {
        let factories = FactoryRules::default().derive([
            "gomap_string_string",
            "gomap_string_interface",
            "goslice_string",
            "goarray_string",
            "Time",
        ]);

        assert_eq!(factories.len(), 6);
        assert_eq!(factories["RawString"], "");
        assert_eq!(factories["GoStringer"], "");
        assert_eq!(factories["gomap_string_string"], "{}");
        assert_eq!(factories["goarray_string"], "[]");
        assert!(!factories.contains_key("Time"));
    }

    #[test]
    fn test_derive_with_no_scalars() {
        let factories = FactoryRules::default().derive(Vec::<String>::new());

        assert_eq!(factories.len(), 2);
    }

    #[test]
    fn test_custom_rules_precedence() {
        let rules = FactoryRules::empty()
            .with_prefix("set_", "[]")
            .with_prefix("set_of_maps", "{}");

        assert_eq!(rules.placeholder_for("set_of_maps_x"), Some("[]"));
        assert!(rules.derive(["other"]).is_empty());
    }
}
