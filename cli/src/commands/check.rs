//! Descriptor check command

use anyhow::{Context, Result};
use magidoc_core::store;
use std::path::Path;
use tracing::info;

/// Load a descriptor and run the structural checks
pub async fn check_command(file: &Path, require_schema: bool) -> Result<()> {
    info!("Checking descriptor {}", file.display());

    let config = store::load_config(file)
        .await
        .with_context(|| format!("Failed to load descriptor: {}", file.display()))?;
    config
        .validate()
        .with_context(|| format!("Descriptor is invalid: {}", file.display()))?;

    println!("📄 {}", file.display());
    println!(
        "   introspection: {} {}",
        config.introspection.kind(),
        config.introspection.location()
    );
    println!("   template:      {}", config.website.template);
    println!("   factories:     {}", config.factories().len());

    if require_schema {
        let resolved = store::check_schema_exists(file, &config).await?;
        println!("   schema:        {}", resolved.display());
    }

    println!("✅ Descriptor is valid");
    Ok(())
}
