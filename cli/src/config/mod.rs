//! CLI settings

pub mod loader;

pub use loader::{CliConfigLoader, GenSettings};
