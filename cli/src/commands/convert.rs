//! Descriptor conversion command

use anyhow::{Context, Result};
use magidoc_core::store;
use std::path::Path;
use tracing::info;

/// Re-render a descriptor in the format implied by the output extension
pub async fn convert_command(input: &Path, output: &Path) -> Result<()> {
    let config = store::load_config(input)
        .await
        .with_context(|| format!("Failed to load descriptor: {}", input.display()))?;

    store::write_config(output, &config)
        .await
        .with_context(|| format!("Failed to write descriptor: {}", output.display()))?;

    info!("Converted {} to {}", input.display(), output.display());
    println!("✅ Wrote {}", output.display());
    Ok(())
}
