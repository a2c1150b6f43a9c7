//! Descriptor generation command

use crate::config::GenSettings;
use anyhow::{Context, Result};
use magidoc_core::{store, MagidocGenerator};
use std::path::PathBuf;
use tracing::{debug, info};

/// Default descriptor file name
pub const DEFAULT_OUT: &str = "magidoc.mjs";

/// Arguments for `generate`, already parsed from the command line
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub schema: Option<String>,
    pub template: Option<String>,
    pub scalars: Vec<String>,
    pub factories: Vec<(String, String)>,
    pub out: Option<PathBuf>,
    pub introspection_dump: Option<PathBuf>,
}

/// Parse a `NAME=VALUE` factory flag; the value may be empty
pub fn parse_factory(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    if name.is_empty() {
        return Err(format!("factory name is empty in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Generate a descriptor from settings and flags
pub async fn generate_command(args: GenerateArgs, settings: GenSettings) -> Result<()> {
    let location = args
        .schema
        .or(settings.schema_location)
        .context("No schema location given; pass --schema or set schema_location")?;

    let mut generator = MagidocGenerator::new(location)
        .with_scalars(settings.scalars)
        .with_scalars(args.scalars)
        .with_overrides(settings.factories);

    if let Some(template) = args.template.or(settings.template) {
        generator = generator.with_template(template);
    }
    for (name, value) in args.factories {
        generator = generator.with_override(name, value);
    }

    let config = generator.build();
    config.validate().context("Generated descriptor is invalid")?;

    let out = args
        .out
        .or(settings.out)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));

    if let Some(dump) = &args.introspection_dump {
        let content = tokio::fs::read_to_string(dump)
            .await
            .with_context(|| format!("Failed to read introspection dump: {}", dump.display()))?;
        let introspection: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Introspection dump is not JSON: {}", dump.display()))?;

        let schema_path = config.introspection.resolve(&out);
        debug!("Copying introspection dump to {}", schema_path.display());
        store::write_schema(&schema_path, &introspection).await?;
    }

    store::write_config(&out, &config)
        .await
        .with_context(|| format!("Failed to write descriptor: {}", out.display()))?;

    info!(
        "Generated descriptor with {} query generation factories",
        config.factories().len()
    );
    println!("✅ Wrote {}", out.display());

    Ok(())
}
