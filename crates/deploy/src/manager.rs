//! Deployment manager: upload and download workflows.
//!
//! Each workflow resolves the configuration, opens a session, transfers,
//! closes the session and emits exactly one terminal event. Failures
//! from any step are classified once, by [`DeploymentManager::dispatch_exception`].

use std::path::PathBuf;
use std::sync::Arc;

use sftpsync_config::{ConfigProvider, SyncConfig, config_path};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::connection::ConnectionProvider;
use crate::error::DeployError;
use crate::events::SyncEvent;
use crate::filter::exclude_config_file;
use crate::host::{FileSource, Host};
use crate::observer::{Observer, ObserverRegistry};
use crate::types::FileDescriptor;

/// What a session should do between open and close.
enum Transfer<'a> {
    Upload(&'a [FileDescriptor]),
    Download(&'a [FileDescriptor]),
}

/// Orchestrates file transfers between the project and its remote target.
pub struct DeploymentManager {
    pub(crate) observers: ObserverRegistry,
    pub(crate) configs: Arc<dyn ConfigProvider>,
    connections: Arc<dyn ConnectionProvider>,
    pub(crate) files: Arc<dyn FileSource>,
    pub(crate) host: Arc<dyn Host>,
    /// Serialises sessions so concurrent triggers queue instead of racing.
    session: Mutex<()>,
}

impl DeploymentManager {
    /// Creates a manager wired to its collaborators.
    pub fn new(
        configs: Arc<dyn ConfigProvider>,
        connections: Arc<dyn ConnectionProvider>,
        files: Arc<dyn FileSource>,
        host: Arc<dyn Host>,
    ) -> Self {
        Self {
            observers: ObserverRegistry::new(),
            configs,
            connections,
            files,
            host,
            session: Mutex::new(()),
        }
    }

    /// Appends an observer. Registration order is notification order.
    pub fn register_observer(&mut self, observer: Arc<dyn Observer>) {
        self.observers.register(observer);
    }

    /// Sends a named event to every observer.
    pub fn notify_observers(&self, event: SyncEvent, payload: Option<&DeployError>) {
        self.observers.notify(event, payload);
    }

    /// Sends a message on the generic error channel.
    pub fn notify_error(&self, message: &str) {
        self.observers.notify_error(message);
    }

    /// Routes a failure to its named event, or to the generic channel.
    pub fn dispatch_exception(&self, e: &DeployError) {
        match e.classify() {
            Some((event, true)) => self.notify_observers(event, Some(e)),
            Some((event, false)) => self.notify_observers(event, None),
            None => self.notify_error(&e.to_string()),
        }
    }

    /// Uploads `files` to the remote target.
    ///
    /// The configuration file is dropped from `files` unless the
    /// configuration allows uploading it.
    pub async fn upload(&self, files: Vec<FileDescriptor>) {
        let Some(path) = self.resolve_config_path() else {
            return;
        };

        match self.try_upload(&path, files).await {
            Ok(true) => {
                info!("upload completed");
                self.notify_observers(SyncEvent::UploadFileSuccess, None);
            }
            Ok(false) => {
                warn!("upload session reported failure");
                self.notify_observers(SyncEvent::UploadFileError, None);
            }
            Err(e) => {
                warn!(error = %e, "upload failed");
                self.dispatch_exception(&e);
            }
        }
    }

    /// Resolves `nodes` on the remote side and downloads the result.
    ///
    /// The configuration file is never filtered on download.
    pub async fn download(&self, nodes: Vec<FileDescriptor>) {
        let Some(path) = self.resolve_config_path() else {
            return;
        };

        match self.try_download(&path, &nodes).await {
            Ok(true) => {
                info!("download completed");
                self.notify_observers(SyncEvent::DownloadFileSuccess, None);
            }
            Ok(false) => {
                warn!("download session reported failure");
                self.notify_observers(SyncEvent::DownloadFileError, None);
            }
            Err(e) => {
                warn!(error = %e, "download failed");
                self.dispatch_exception(&e);
            }
        }
    }

    async fn try_upload(
        &self,
        path: &std::path::Path,
        files: Vec<FileDescriptor>,
    ) -> Result<bool, DeployError> {
        let config = self.load_config(path).await?;
        let files = exclude_config_file(&config, files);
        debug!(files = files.len(), "upload set resolved");
        self.run_session(&config, Transfer::Upload(&files)).await
    }

    async fn try_download(
        &self,
        path: &std::path::Path,
        nodes: &[FileDescriptor],
    ) -> Result<bool, DeployError> {
        let config = self.load_config(path).await?;
        self.run_session(&config, Transfer::Download(nodes)).await
    }

    /// Opens a session, runs `transfer` and closes the session on every
    /// path after a successful open.
    ///
    /// Returns the session's success flag. A transfer error takes
    /// precedence over a close error.
    async fn run_session(
        &self,
        config: &SyncConfig,
        transfer: Transfer<'_>,
    ) -> Result<bool, DeployError> {
        let _session = self.session.lock().await;

        let mut conn = self.connections.open_connection(config).await?;
        debug!(transport = %config.transport, "connection opened");

        let transferred = match transfer {
            Transfer::Upload(files) => conn.upload(files).await,
            Transfer::Download(nodes) => match conn.get_target_files(nodes).await {
                Ok(files) => {
                    debug!(files = files.len(), "download set resolved");
                    conn.download(&files).await
                }
                Err(e) => Err(e),
            },
        };

        let closed = conn.close().await;
        debug!("connection closed");

        match (transferred, closed) {
            (Ok(()), closed) => closed,
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!(error = %close_err, "failed to close connection after transfer error");
                Err(e)
            }
        }
    }

    /// Resolves `<project root>/atom-sftp-sync.json`.
    ///
    /// Emits `project_not_found` when no project is open.
    pub(crate) fn resolve_config_path(&self) -> Option<PathBuf> {
        match self.host.project_root() {
            Some(root) => Some(config_path(&root)),
            None => {
                warn!("no project root available");
                self.notify_observers(SyncEvent::ProjectNotFound, None);
                None
            }
        }
    }

    pub(crate) async fn load_config(
        &self,
        path: &std::path::Path,
    ) -> Result<SyncConfig, DeployError> {
        Ok(self.configs.load_config(path).await?)
    }
}

impl std::fmt::Debug for DeploymentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentManager")
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
