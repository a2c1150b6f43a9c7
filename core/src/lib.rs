//! # magidoc Core
//!
//! Core library for magidoc-gen.
//!
//! This library models the descriptor a GraphQL documentation generator reads
//! at startup: where the introspection schema lives, which site template to
//! use, and which placeholder to substitute for custom scalars when the
//! generator synthesizes example queries. It can derive those placeholders
//! from scalar names, render descriptors as ES modules or JSON, read them back
//! and write them to disk.

// Core modules
pub mod config;
pub mod error;
pub mod factories;
pub mod format;
pub mod generator;
pub mod store;

// Re-export commonly used types
pub use config::{IntrospectionSource, MagidocConfig, WebsiteConfig, WebsiteOptions};
pub use error::{ConfigError, Error, Result};
pub use factories::FactoryRules;
pub use format::ConfigFormat;
pub use generator::MagidocGenerator;

/// Current version of the magidoc-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
///
/// Logs go to stderr.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
