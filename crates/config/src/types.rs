//! Data types for the project configuration file.

use serde::{Deserialize, Serialize};

/// Transport used to reach the remote target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Sftp,
    Ftp,
    /// A directory on this machine, mirrored like a remote host.
    Local,
}

impl TransportKind {
    /// Port used when the file does not specify one.
    pub fn default_port(self) -> u16 {
        match self {
            TransportKind::Sftp => 22,
            TransportKind::Ftp => 21,
            TransportKind::Local => 0,
        }
    }

    /// Whether the transport needs a host name to connect.
    pub fn requires_host(self) -> bool {
        !matches!(self, TransportKind::Local)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Sftp => "sftp",
            TransportKind::Ftp => "ftp",
            TransportKind::Local => "local",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of `atom-sftp-sync.json`.
///
/// Immutable once loaded; the engine reads a fresh copy for every
/// workflow invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    #[serde(rename = "type")]
    pub transport: TransportKind,
    pub host: String,
    /// `0` means "use the transport's default port".
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssh_key_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub passphrase: String,
    pub remote_path: String,
    /// Upload the current file whenever it is saved.
    pub upload_on_save: bool,
    /// Allow the configuration file itself to be transferred.
    pub upload_config_file: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            host: String::new(),
            port: 0,
            user: String::new(),
            password: String::new(),
            ssh_key_file: String::new(),
            passphrase: String::new(),
            remote_path: "/".into(),
            upload_on_save: false,
            upload_config_file: false,
        }
    }
}

impl SyncConfig {
    /// Port to connect to, falling back to the transport default.
    pub fn effective_port(&self) -> u16 {
        if self.port == 0 {
            self.transport.default_port()
        } else {
            self.port
        }
    }

    /// Checks semantic constraints that JSON parsing cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.remote_path.trim().is_empty() {
            return Err("remotePath must not be empty".into());
        }
        if self.transport.requires_host() && self.host.trim().is_empty() {
            return Err(format!("host is required for {} transport", self.transport));
        }
        Ok(())
    }
}
