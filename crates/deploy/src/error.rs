//! Deploy failure taxonomy.

use sftpsync_config::ConfigError;

use crate::events::SyncEvent;

/// Failures produced by the engine's collaborators.
///
/// Every collaborator reports errors as one of these variants; the engine
/// never inspects them beyond the variant itself. Messages are kept as
/// strings so errors can be cloned into observer channels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    #[error("no configuration file found: {0}")]
    NoConfigurationFileFound(String),

    #[error("configuration file not readable: {0}")]
    ConfigurationFileNotReadable(String),

    #[error("configuration file syntax error: {0}")]
    ConfigurationFileSyntaxError(String),

    #[error("configuration file creation failed: {0}")]
    ConfigurationFileCreationError(String),

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("upload failed: {0}")]
    UploadError(String),

    #[error("download failed: {0}")]
    DownloadError(String),

    #[error("cannot create remote directory: {0}")]
    RemoteDirectoryCreationError(String),

    #[error("remote directory not readable: {0}")]
    RemoteDirectoryNotReadable(String),

    #[error("cannot create local directory: {0}")]
    DirectoryCreationError(String),

    #[error("remote system error: {0}")]
    RemoteSystemError(String),

    #[error("transfer failed: {0}")]
    TransfertError(String),

    /// A failure outside the taxonomy (plain I/O, host bugs, ...).
    #[error("{0}")]
    Unclassified(String),
}

impl DeployError {
    /// Maps the error to its named outcome event.
    ///
    /// Returns the event and whether the error travels with it as
    /// payload. `None` means the error has no named event and goes to the
    /// generic error channel.
    pub fn classify(&self) -> Option<(SyncEvent, bool)> {
        match self {
            DeployError::NoConfigurationFileFound(_) => {
                Some((SyncEvent::NoConfigurationFileFound, false))
            }
            DeployError::ConfigurationFileNotReadable(_) => {
                Some((SyncEvent::ConfigurationFileNotReadable, false))
            }
            DeployError::ConfigurationFileSyntaxError(_) => {
                Some((SyncEvent::ConfigurationFileSyntaxError, true))
            }
            DeployError::ConfigurationFileCreationError(_) => {
                Some((SyncEvent::ConfigurationFileCreationError, true))
            }
            DeployError::ConnectionError(_) => Some((SyncEvent::ConnectionError, true)),
            DeployError::UploadError(_) => Some((SyncEvent::UploadFileError, true)),
            DeployError::RemoteDirectoryCreationError(_) => {
                Some((SyncEvent::RemoteDirectoryCreationError, true))
            }
            DeployError::RemoteSystemError(_) => Some((SyncEvent::RemoteSystemError, true)),
            DeployError::TransfertError(_) => Some((SyncEvent::TransfertFileError, true)),
            DeployError::DownloadError(_)
            | DeployError::RemoteDirectoryNotReadable(_)
            | DeployError::DirectoryCreationError(_)
            | DeployError::Unclassified(_) => None,
        }
    }
}

impl From<ConfigError> for DeployError {
    fn from(e: ConfigError) -> Self {
        let message = e.to_string();
        match e {
            ConfigError::NotFound { .. } => DeployError::NoConfigurationFileFound(message),
            ConfigError::NotReadable { .. } => DeployError::ConfigurationFileNotReadable(message),
            ConfigError::Syntax { .. } => DeployError::ConfigurationFileSyntaxError(message),
            ConfigError::Write { .. } | ConfigError::Serialize(_) => {
                DeployError::ConfigurationFileCreationError(message)
            }
        }
    }
}

impl From<std::io::Error> for DeployError {
    fn from(e: std::io::Error) -> Self {
        DeployError::Unclassified(e.to_string())
    }
}
