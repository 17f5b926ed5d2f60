//! Data types shared by the engine and its collaborators.

use std::path::PathBuf;

use sftpsync_config::TransportKind;

/// One file or directory node subject to transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Path relative to the project root, `/`-separated.
    pub relative_path: String,
    /// Location of the node on the local filesystem.
    pub local_path: PathBuf,
}

impl FileDescriptor {
    pub fn new(relative_path: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            local_path: local_path.into(),
        }
    }
}

/// Action bound to a dialog button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Overwrite local files with their remote version.
    Overwrite,
    /// Generate a configuration file for the given transport.
    Generate(TransportKind),
}

/// A button in a confirmation dialog. `choice: None` cancels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    pub label: &'static str,
    pub choice: Option<Choice>,
}

/// A confirmation dialog rendered by the [`Host`](crate::Host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub message: String,
    pub detail: Option<String>,
    pub buttons: Vec<DialogButton>,
}

impl Dialog {
    /// Resolves the action of the button at `index`.
    ///
    /// Out-of-range indices and cancel buttons both yield `None`.
    pub fn choice(&self, index: Option<usize>) -> Option<Choice> {
        index
            .and_then(|i| self.buttons.get(i))
            .and_then(|button| button.choice)
    }

    pub(crate) fn overwrite(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            buttons: vec![
                DialogButton {
                    label: "Overwrite",
                    choice: Some(Choice::Overwrite),
                },
                DialogButton {
                    label: "Cancel",
                    choice: None,
                },
            ],
        }
    }

    pub(crate) fn generate_config() -> Self {
        Self {
            message: "Which type of configuration do you want to generate?".into(),
            detail: Some("Be careful, this will overwrite the existing configuration file!".into()),
            buttons: vec![
                DialogButton {
                    label: "SFTP",
                    choice: Some(Choice::Generate(TransportKind::Sftp)),
                },
                DialogButton {
                    label: "FTP",
                    choice: Some(Choice::Generate(TransportKind::Ftp)),
                },
                DialogButton {
                    label: "Cancel",
                    choice: None,
                },
            ],
        }
    }
}
