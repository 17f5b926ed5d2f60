//! Per-project sync configuration.
//!
//! Every project keeps a single JSON file at its root
//! ([`CONFIG_FILE_NAME`]). This crate owns its data model, the default
//! values used when generating a fresh file, and the JSON-backed
//! [`ConfigProvider`] the deploy engine loads it through.

mod builder;
mod error;
mod provider;
mod types;

use std::path::{Path, PathBuf};

pub use builder::ConfigBuilder;
pub use error::ConfigError;
pub use provider::{ConfigProvider, JsonConfigProvider, parse_config, write_config};
pub use types::{SyncConfig, TransportKind};

/// Name of the configuration file, relative to the project root.
///
/// The same name is used for loading, generating and for excluding the
/// file itself from transfers.
pub const CONFIG_FILE_NAME: &str = "atom-sftp-sync.json";

/// Returns the configuration file path for a project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}
