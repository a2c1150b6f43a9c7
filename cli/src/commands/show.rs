//! Descriptor display command

use anyhow::{Context, Result};
use magidoc_core::{format, store};
use std::path::Path;

/// Print a descriptor as JSON
pub async fn show_command(file: &Path) -> Result<()> {
    let config = store::load_config(file)
        .await
        .with_context(|| format!("Failed to load descriptor: {}", file.display()))?;

    print!("{}", format::render_json(&config)?);
    Ok(())
}
