//! Outcome event vocabulary.

use serde::Serialize;

/// Named lifecycle and outcome events delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncEvent {
    /// A workflow is about to start transferring.
    BeginTransfert,
    UploadFileSuccess,
    /// Terminal upload failure, either reported by the session or classified.
    UploadFileError,
    DownloadFileSuccess,
    DownloadFileError,
    NoConfigurationFileFound,
    ConfigurationFileNotReadable,
    ConfigurationFileSyntaxError,
    ConnectionError,
    RemoteDirectoryCreationError,
    RemoteSystemError,
    TransfertFileError,
    ProjectNotFound,
    ConfigurationFileCreationSuccess,
    ConfigurationFileCreationError,
}

impl SyncEvent {
    /// Wire name of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            SyncEvent::BeginTransfert => "begin_transfert",
            SyncEvent::UploadFileSuccess => "upload_file_success",
            SyncEvent::UploadFileError => "upload_file_error",
            SyncEvent::DownloadFileSuccess => "download_file_success",
            SyncEvent::DownloadFileError => "download_file_error",
            SyncEvent::NoConfigurationFileFound => "no_configuration_file_found",
            SyncEvent::ConfigurationFileNotReadable => "configuration_file_not_readable",
            SyncEvent::ConfigurationFileSyntaxError => "configuration_file_syntax_error",
            SyncEvent::ConnectionError => "connection_error",
            SyncEvent::RemoteDirectoryCreationError => "remote_directory_creation_error",
            SyncEvent::RemoteSystemError => "remote_system_error",
            SyncEvent::TransfertFileError => "transfert_file_error",
            SyncEvent::ProjectNotFound => "project_not_found",
            SyncEvent::ConfigurationFileCreationSuccess => "configuration_file_creation_success",
            SyncEvent::ConfigurationFileCreationError => "configuration_file_creation_error",
        }
    }

    /// Whether the event ends a workflow in failure.
    pub fn is_error(self) -> bool {
        !matches!(
            self,
            SyncEvent::BeginTransfert
                | SyncEvent::UploadFileSuccess
                | SyncEvent::DownloadFileSuccess
                | SyncEvent::ConfigurationFileCreationSuccess
        )
    }
}

impl std::fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
