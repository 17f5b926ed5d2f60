//! Loading and saving configuration files.

use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;
use std::pin::Pin;

use tracing::debug;

use crate::error::ConfigError;
use crate::types::SyncConfig;

/// Source of project configurations.
///
/// The deploy engine only talks to this trait, so hosts can swap the
/// JSON file for another store and tests can inject canned configs.
pub trait ConfigProvider: Send + Sync {
    /// Loads and validates the configuration stored at `path`.
    fn load_config<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<SyncConfig, ConfigError>> + Send + 'a>>;

    /// Persists `config` at `path`, overwriting any existing file.
    fn save_config<'a>(
        &'a self,
        path: &'a Path,
        config: &'a SyncConfig,
    ) -> Pin<Box<dyn Future<Output = Result<(), ConfigError>> + Send + 'a>>;
}

/// Reads and writes `atom-sftp-sync.json` files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfigProvider;

impl JsonConfigProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigProvider for JsonConfigProvider {
    fn load_config<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<SyncConfig, ConfigError>> + Send + 'a>> {
        Box::pin(async move {
            let content = match tokio::fs::read_to_string(path).await {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::NotReadable {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            };

            let config = parse_config(path, &content)?;
            debug!(path = %path.display(), transport = %config.transport, "configuration loaded");
            Ok(config)
        })
    }

    fn save_config<'a>(
        &'a self,
        path: &'a Path,
        config: &'a SyncConfig,
    ) -> Pin<Box<dyn Future<Output = Result<(), ConfigError>> + Send + 'a>> {
        Box::pin(write_config(path, config))
    }
}

/// Parses and validates configuration file contents.
///
/// `path` is only used to label errors. Well-formed JSON that fails
/// validation is reported as a syntax error as well.
pub fn parse_config(path: &Path, content: &str) -> Result<SyncConfig, ConfigError> {
    let config: SyncConfig = serde_json::from_str(content).map_err(|e| ConfigError::Syntax {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.validate().map_err(|message| ConfigError::Syntax {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(config)
}

/// Serializes `config` as pretty JSON and writes it to `path`.
pub async fn write_config(path: &Path, config: &SyncConfig) -> Result<(), ConfigError> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "configuration written");
    Ok(())
}
