//! Reading and writing descriptor files

use crate::config::MagidocConfig;
use crate::error::{ConfigError, Result};
use crate::format::ConfigFormat;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Load a descriptor, choosing the format from the file extension
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<MagidocConfig> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    if !fs::try_exists(path).await? {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path).await?;
    let config = format.parse(&content)?;
    debug!("Loaded descriptor from {}", path.display());

    Ok(config)
}

/// Write a descriptor, choosing the format from the file extension
pub async fn write_config<P: AsRef<Path>>(path: P, config: &MagidocConfig) -> Result<()> {
    let path = path.as_ref();
    let content = ConfigFormat::from_path(path)?.render(config)?;

    create_parent_dir(path).await?;
    fs::write(path, content).await?;
    info!("Wrote descriptor to {}", path.display());

    Ok(())
}

/// Write an introspection result as compact JSON
pub async fn write_schema<P: AsRef<Path>>(path: P, introspection: &serde_json::Value) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_vec(introspection)?;

    create_parent_dir(path).await?;
    fs::write(path, content).await?;
    info!("Wrote introspection schema to {}", path.display());

    Ok(())
}

/// Resolve the descriptor's schema location and make sure it is a file
pub async fn check_schema_exists<P: AsRef<Path>>(
    config_path: P,
    config: &MagidocConfig,
) -> Result<PathBuf> {
    let resolved = config.introspection.resolve(config_path);

    let is_file = match fs::metadata(&resolved).await {
        Ok(metadata) => metadata.is_file(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
        Err(err) => return Err(err.into()),
    };

    if !is_file {
        return Err(ConfigError::SchemaNotFound {
            path: resolved.display().to_string(),
        }
        .into());
    }

    Ok(resolved)
}

async fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> MagidocConfig {
        MagidocConfig::new("schema/schema.json")
            .with_factory("GoMap", "{}")
            .with_factory("GoArray", "[]")
    }

    #[tokio::test]
    async fn test_write_and_load_mjs() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("docs").join("magidoc.mjs");

        write_config(&path, &sample()).await.unwrap();
        let loaded = load_config(&path).await.unwrap();

        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_write_truncates_existing_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("magidoc.json");
        tokio::fs::write(&path, "x".repeat(4096)).await.unwrap();

        write_config(&path, &sample()).await.unwrap();

        assert_eq!(load_config(&path).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = load_config(temp_dir.path().join("missing.mjs"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_unsupported_extension() {
        let err = load_config("magidoc.toml").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_check_schema_exists() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("magidoc.mjs");
        let config = sample();

        let err = check_schema_exists(&config_path, &config).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::SchemaNotFound { .. })
        ));

        let schema_path = temp_dir.path().join("schema").join("schema.json");
        write_schema(&schema_path, &json!({ "__schema": { "types": [] } }))
            .await
            .unwrap();

        let resolved = check_schema_exists(&config_path, &config).await.unwrap();
        assert_eq!(resolved, schema_path);
    }

    #[tokio::test]
    async fn test_write_schema_is_compact_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("schema.json");
        let introspection = json!({ "__schema": { "queryType": { "name": "Query" } } });

        write_schema(&path, &introspection).await.unwrap();
        let content = tokio::fs::read_to_string(&path).await.unwrap();

        assert!(!content.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&content).unwrap(),
            introspection
        );
    }
}
