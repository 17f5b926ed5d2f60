//! Host environment traits: where files and confirmations come from.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::DeployError;
use crate::types::{Dialog, FileDescriptor};

/// Produces the candidate file set for a trigger.
pub trait FileSource: Send + Sync {
    /// The file currently being edited.
    fn get_current_file(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<FileDescriptor, DeployError>> + Send + '_>>;

    /// Every open file.
    fn get_open_files(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + '_>>;

    /// The current selection; may contain directories.
    fn get_selection(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + '_>>;
}

/// The embedding environment.
pub trait Host: Send + Sync {
    /// Root of the current project, if one is open.
    fn project_root(&self) -> Option<PathBuf>;

    /// Shows `dialog` and returns the index of the clicked button.
    ///
    /// `None` means the dialog was dismissed without a choice.
    fn confirm<'a>(
        &'a self,
        dialog: &'a Dialog,
    ) -> Pin<Box<dyn Future<Output = Option<usize>> + Send + 'a>>;
}
