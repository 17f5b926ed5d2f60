//! Terminal implementations of the engine's host traits.

use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;

use anyhow::{Context, bail};
use dialoguer::Select;
use sftpsync_deploy::{DeployError, Dialog, FileDescriptor, FileSource, Host};
use sftpsync_transport_local::validate_relative_path;

/// Serves the paths given on the command line as the editor state.
///
/// The first path is the "current file"; all of them are both the open
/// files and the selection.
#[derive(Debug, Clone)]
pub struct ArgsFileSource {
    files: Vec<FileDescriptor>,
}

impl ArgsFileSource {
    /// Resolves `paths` against `project`. Paths outside it are rejected.
    pub fn new(project: &Path, paths: Vec<PathBuf>) -> anyhow::Result<Self> {
        let files = paths
            .into_iter()
            .map(|path| descriptor(project, &path))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { files })
    }
}

fn descriptor(project: &Path, path: &Path) -> anyhow::Result<FileDescriptor> {
    let absolute = project.join(path);
    let rel = absolute
        .strip_prefix(project)
        .with_context(|| format!("{} is outside the project", path.display()))?;

    let rel = rel
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if let Err(reason) = validate_relative_path(&rel) {
        bail!("invalid path {}: {reason}", path.display());
    }

    Ok(FileDescriptor::new(rel, absolute))
}

impl FileSource for ArgsFileSource {
    fn get_current_file(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<FileDescriptor, DeployError>> + Send + '_>> {
        Box::pin(async move {
            self.files
                .first()
                .cloned()
                .ok_or_else(|| DeployError::Unclassified("no file given".into()))
        })
    }

    fn get_open_files(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + '_>> {
        Box::pin(async move { Ok(self.files.clone()) })
    }

    fn get_selection(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + '_>> {
        Box::pin(async move { Ok(self.files.clone()) })
    }
}

/// Renders confirmation dialogs on the terminal.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    project: PathBuf,
    assume_yes: bool,
}

impl TerminalHost {
    pub fn new(project: PathBuf, assume_yes: bool) -> Self {
        Self {
            project,
            assume_yes,
        }
    }
}

impl Host for TerminalHost {
    fn project_root(&self) -> Option<PathBuf> {
        Some(self.project.clone())
    }

    fn confirm<'a>(
        &'a self,
        dialog: &'a Dialog,
    ) -> Pin<Box<dyn Future<Output = Option<usize>> + Send + 'a>> {
        if self.assume_yes {
            return Box::pin(async { Some(0) });
        }

        let prompt = match &dialog.detail {
            Some(detail) => format!("{}\n  {}", dialog.message, detail),
            None => dialog.message.clone(),
        };
        let labels: Vec<&'static str> = dialog.buttons.iter().map(|b| b.label).collect();

        Box::pin(async move {
            let picked = tokio::task::spawn_blocking(move || {
                Select::new()
                    .with_prompt(prompt)
                    .items(&labels)
                    .default(0)
                    .interact_opt()
            })
            .await;

            match picked {
                Ok(Ok(choice)) => choice,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "cannot show confirmation prompt");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "confirmation prompt task failed");
                    None
                }
            }
        })
    }
}
