//! Human-readable outcome reporting.

use std::sync::atomic::{AtomicBool, Ordering};

use sftpsync_deploy::{DeployError, Observer, SyncEvent};

/// Prints one line per event and remembers whether any failure was seen.
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    failed: AtomicBool,
}

impl ConsoleObserver {
    /// Whether an error event or generic error has been observed.
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Message shown for an event.
pub fn describe(event: SyncEvent) -> &'static str {
    match event {
        SyncEvent::BeginTransfert => "Transfer started...",
        SyncEvent::UploadFileSuccess => "Upload complete.",
        SyncEvent::UploadFileError => "Upload failed.",
        SyncEvent::DownloadFileSuccess => "Download complete.",
        SyncEvent::DownloadFileError => "Download failed.",
        SyncEvent::NoConfigurationFileFound => {
            "No configuration file found. Run `sftpsync init` to create one."
        }
        SyncEvent::ConfigurationFileNotReadable => "The configuration file is not readable.",
        SyncEvent::ConfigurationFileSyntaxError => "The configuration file has a syntax error.",
        SyncEvent::ConnectionError => "Cannot connect to the remote target.",
        SyncEvent::RemoteDirectoryCreationError => "Cannot create a remote directory.",
        SyncEvent::RemoteSystemError => "The remote target reported an error.",
        SyncEvent::TransfertFileError => "A file transfer failed.",
        SyncEvent::ProjectNotFound => "No project is open.",
        SyncEvent::ConfigurationFileCreationSuccess => "Configuration file created.",
        SyncEvent::ConfigurationFileCreationError => "Cannot create the configuration file.",
    }
}

impl Observer for ConsoleObserver {
    fn notify(&self, event: SyncEvent, payload: Option<&DeployError>) {
        if event.is_error() {
            self.failed.store(true, Ordering::Relaxed);
        }
        match payload {
            Some(e) => println!("{} ({e})", describe(event)),
            None => println!("{}", describe(event)),
        }
    }

    fn notify_error(&self, message: &str) {
        self.failed.store(true, Ordering::Relaxed);
        println!("Error: {message}");
    }
}
