//! Local mirror sessions.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use sftpsync_config::{SyncConfig, TransportKind};
use sftpsync_deploy::{Connection, ConnectionProvider, DeployError, FileDescriptor};
use tracing::{debug, info, warn};

use crate::checksum::file_checksum;
use crate::scanner::scan_files;
use crate::validation::validate_relative_path;

/// Opens [`LocalConnection`]s for `"type": "local"` configurations.
///
/// A relative `remotePath` is resolved against the project root.
#[derive(Debug, Clone)]
pub struct LocalConnectionProvider {
    project_root: PathBuf,
}

impl LocalConnectionProvider {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }
}

impl ConnectionProvider for LocalConnectionProvider {
    fn open_connection<'a>(
        &'a self,
        config: &'a SyncConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Box<dyn Connection>, DeployError>> + Send + 'a>> {
        Box::pin(async move {
            let conn = LocalConnection::open(&self.project_root, config).await?;
            let conn: Box<dyn Connection> = Box::new(conn);
            Ok(conn)
        })
    }
}

/// A session against a mirror directory.
///
/// Every copy is verified by SHA-256. A mismatch does not abort the
/// session but makes [`close`](Connection::close) report failure.
#[derive(Debug)]
pub struct LocalConnection {
    remote_root: PathBuf,
    closed: bool,
    failed: bool,
}

impl LocalConnection {
    /// Opens a session on the mirror directory named by `config`.
    pub async fn open(project_root: &Path, config: &SyncConfig) -> Result<Self, DeployError> {
        if config.transport != TransportKind::Local {
            return Err(DeployError::ConnectionError(format!(
                "{} transport is not available, only local mirrors are supported",
                config.transport
            )));
        }

        let remote_root = project_root.join(&config.remote_path);
        match tokio::fs::metadata(&remote_root).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(DeployError::ConnectionError(format!(
                    "{} is not a directory",
                    remote_root.display()
                )));
            }
            Err(e) => {
                return Err(DeployError::ConnectionError(format!(
                    "{}: {e}",
                    remote_root.display()
                )));
            }
        }

        info!(remote = %remote_root.display(), "local mirror opened");
        Ok(Self {
            remote_root,
            closed: false,
            failed: false,
        })
    }

    pub fn remote_root(&self) -> &Path {
        &self.remote_root
    }

    fn ensure_open(&self) -> Result<(), DeployError> {
        if self.closed {
            Err(DeployError::RemoteSystemError("connection already closed".into()))
        } else {
            Ok(())
        }
    }

    async fn upload_files(&mut self, files: &[FileDescriptor]) -> Result<(), DeployError> {
        self.ensure_open()?;

        for file in files {
            validate_relative_path(&file.relative_path).map_err(DeployError::UploadError)?;

            for (rel, source) in expand_local(file).await? {
                let dest = self.remote_root.join(&rel);
                if let Some(parent) = dest.parent() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        DeployError::RemoteDirectoryCreationError(format!(
                            "{}: {e}",
                            parent.display()
                        ))
                    })?;
                }

                tokio::fs::copy(&source, &dest)
                    .await
                    .map_err(|e| DeployError::UploadError(format!("{rel}: {e}")))?;
                self.verify(&source, &dest, &rel).await;
                debug!(file = %rel, "uploaded");
            }
        }

        Ok(())
    }

    async fn download_files(&mut self, files: &[FileDescriptor]) -> Result<(), DeployError> {
        self.ensure_open()?;

        for file in files {
            validate_relative_path(&file.relative_path).map_err(DeployError::TransfertError)?;

            let source = self.remote_root.join(&file.relative_path);
            if let Some(parent) = file.local_path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    DeployError::DirectoryCreationError(format!("{}: {e}", parent.display()))
                })?;
            }

            tokio::fs::copy(&source, &file.local_path)
                .await
                .map_err(|e| DeployError::TransfertError(format!("{}: {e}", file.relative_path)))?;
            self.verify(&source, &file.local_path, &file.relative_path)
                .await;
            debug!(file = %file.relative_path, "downloaded");
        }

        Ok(())
    }

    async fn resolve_targets(
        &mut self,
        nodes: &[FileDescriptor],
    ) -> Result<Vec<FileDescriptor>, DeployError> {
        self.ensure_open()?;

        let mut targets = Vec::new();
        for node in nodes {
            validate_relative_path(&node.relative_path).map_err(DeployError::RemoteSystemError)?;

            let remote = self.remote_root.join(&node.relative_path);
            let metadata = tokio::fs::metadata(&remote).await.map_err(|e| {
                DeployError::RemoteSystemError(format!("{}: {e}", node.relative_path))
            })?;

            if !metadata.is_dir() {
                targets.push(node.clone());
                continue;
            }

            let (children, _) = blocking(move || scan_files(&remote)).await.map_err(|e| {
                DeployError::RemoteDirectoryNotReadable(format!("{}: {e}", node.relative_path))
            })?;
            targets.extend(children.into_iter().map(|child| {
                FileDescriptor::new(
                    join_relative(&node.relative_path, &child.relative_path),
                    node.local_path.join(&child.relative_path),
                )
            }));
        }

        Ok(targets)
    }

    /// Compares checksums of both copies and marks the session failed on
    /// mismatch.
    async fn verify(&mut self, source: &Path, dest: &Path, rel: &str) {
        let (source, dest) = (source.to_path_buf(), dest.to_path_buf());
        let matched = blocking(move || Ok(file_checksum(&source)? == file_checksum(&dest)?)).await;

        match matched {
            Ok(true) => {}
            Ok(false) => {
                warn!(file = %rel, "checksum mismatch after copy");
                self.failed = true;
            }
            Err(e) => {
                warn!(file = %rel, error = %e, "cannot verify copy");
                self.failed = true;
            }
        }
    }
}

impl Connection for LocalConnection {
    fn upload<'a>(
        &'a mut self,
        files: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + 'a>> {
        Box::pin(self.upload_files(files))
    }

    fn download<'a>(
        &'a mut self,
        files: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + 'a>> {
        Box::pin(self.download_files(files))
    }

    fn get_target_files<'a>(
        &'a mut self,
        nodes: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + 'a>>
    {
        Box::pin(self.resolve_targets(nodes))
    }

    fn close(&mut self) -> Pin<Box<dyn Future<Output = Result<bool, DeployError>> + Send + '_>> {
        Box::pin(async move {
            self.ensure_open()?;
            self.closed = true;
            debug!(remote = %self.remote_root.display(), failed = self.failed, "local mirror closed");
            Ok(!self.failed)
        })
    }
}

/// Expands a local node into `(relative path, local file)` pairs.
///
/// Directories are walked recursively; files map to themselves.
async fn expand_local(file: &FileDescriptor) -> Result<Vec<(String, PathBuf)>, DeployError> {
    let metadata = tokio::fs::metadata(&file.local_path)
        .await
        .map_err(|e| DeployError::UploadError(format!("{}: {e}", file.relative_path)))?;

    if !metadata.is_dir() {
        return Ok(vec![(file.relative_path.clone(), file.local_path.clone())]);
    }

    let root = file.local_path.clone();
    let (children, _) = blocking(move || scan_files(&root))
        .await
        .map_err(|e| DeployError::UploadError(format!("{}: {e}", file.relative_path)))?;

    Ok(children
        .into_iter()
        .map(|child| {
            (
                join_relative(&file.relative_path, &child.relative_path),
                file.local_path.join(&child.relative_path),
            )
        })
        .collect())
}

fn join_relative(base: &str, child: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() || base == "." {
        child.to_string()
    } else {
        format!("{base}/{child}")
    }
}

async fn blocking<T, F>(f: F) -> std::io::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> std::io::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(std::io::Error::other)?
}
