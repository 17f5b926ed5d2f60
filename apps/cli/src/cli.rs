use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sync project files with the target named in atom-sftp-sync.json
#[derive(Parser, Debug)]
#[command(name = "sftpsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Answer confirmations with their first choice
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload files, as if they were the open editors.
    ///
    /// Relative paths are resolved against the project root.
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Upload a single file, as if it were the active editor
    UploadCurrent { path: PathBuf },

    /// Run the save hook for a file (uploads only if uploadOnSave is set)
    OnSave { path: PathBuf },

    /// Download files or directories, overwriting local copies
    Download {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Download a single file, overwriting the local copy
    DownloadCurrent { path: PathBuf },

    /// Generate a default configuration file
    Init,
}

impl Command {
    /// Paths the command operates on, in the order given.
    pub fn paths(&self) -> Vec<PathBuf> {
        match self {
            Command::Upload { paths } | Command::Download { paths } => paths.clone(),
            Command::UploadCurrent { path }
            | Command::OnSave { path }
            | Command::DownloadCurrent { path } => vec![path.clone()],
            Command::Init => Vec::new(),
        }
    }
}
