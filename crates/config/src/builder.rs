//! Default configurations for freshly generated files.

use std::path::Path;

use crate::error::ConfigError;
use crate::provider::write_config;
use crate::types::{SyncConfig, TransportKind};

/// Builds a [`SyncConfig`] seeded with the defaults of a transport kind.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: SyncConfig,
}

impl ConfigBuilder {
    /// Starts from the defaults for `kind`.
    pub fn new(kind: TransportKind) -> Self {
        let mut config = SyncConfig {
            transport: kind,
            port: kind.default_port(),
            ..SyncConfig::default()
        };
        match kind {
            TransportKind::Sftp => {
                config.host = "example.com".into();
                config.user = "username".into();
                config.ssh_key_file = "~/.ssh/id_rsa".into();
                config.remote_path = "/var/www".into();
            }
            TransportKind::Ftp => {
                config.host = "example.com".into();
                config.user = "username".into();
                config.password = "password".into();
                config.remote_path = "/var/www".into();
            }
            TransportKind::Local => {}
        }
        Self { config }
    }

    pub fn sftp() -> Self {
        Self::new(TransportKind::Sftp)
    }

    pub fn ftp() -> Self {
        Self::new(TransportKind::Ftp)
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = user.into();
        self
    }

    pub fn remote_path(mut self, remote_path: impl Into<String>) -> Self {
        self.config.remote_path = remote_path.into();
        self
    }

    pub fn upload_on_save(mut self, enabled: bool) -> Self {
        self.config.upload_on_save = enabled;
        self
    }

    pub fn upload_config_file(mut self, enabled: bool) -> Self {
        self.config.upload_config_file = enabled;
        self
    }

    pub fn build(self) -> SyncConfig {
        self.config
    }

    /// Writes the configuration to `path`, replacing any existing file.
    pub async fn save(self, path: &Path) -> Result<SyncConfig, ConfigError> {
        write_config(path, &self.config).await?;
        Ok(self.config)
    }
}
