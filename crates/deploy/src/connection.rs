//! Transport session traits.
//!
//! Concrete transports (SFTP, FTP, a local mirror) implement these.
//! Keeping them as traits keeps the workflows decoupled from any wire
//! protocol and testable with mocks.

use std::future::Future;
use std::pin::Pin;

use sftpsync_config::SyncConfig;

use crate::error::DeployError;
use crate::types::FileDescriptor;

/// Opens transport sessions from a configuration.
pub trait ConnectionProvider: Send + Sync {
    /// Establishes a session. Fails with [`DeployError::ConnectionError`]
    /// when the transport cannot be reached.
    fn open_connection<'a>(
        &'a self,
        config: &'a SyncConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Box<dyn Connection>, DeployError>> + Send + 'a>>;
}

/// An open transport session.
///
/// Must not be used after [`close`](Connection::close). The engine calls
/// `close` exactly once per successful open.
pub trait Connection: Send {
    /// Sends local files to the remote target.
    fn upload<'a>(
        &'a mut self,
        files: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + 'a>>;

    /// Fetches remote files into their local paths.
    fn download<'a>(
        &'a mut self,
        files: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + 'a>>;

    /// Expands nodes (files or directories) into concrete remote files.
    fn get_target_files<'a>(
        &'a mut self,
        nodes: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + 'a>>;

    /// Releases the session.
    ///
    /// Returns whether every transfer of the session succeeded. A session
    /// can finish without an error yet report `false`.
    fn close(&mut self) -> Pin<Box<dyn Future<Output = Result<bool, DeployError>> + Send + '_>>;
}
