//! Trigger entry points: current file, open files, selection, on-save,
//! and configuration file generation.

use sftpsync_config::{ConfigBuilder, SyncConfig};
use tracing::{debug, info, warn};

use crate::error::DeployError;
use crate::events::SyncEvent;
use crate::filter::{exclude_config_file, is_config_file};
use crate::manager::DeploymentManager;
use crate::types::{Choice, Dialog};

const DOWNLOAD_CURRENT_FILE_PROMPT: &str =
    "You will download the current file, be careful, it will be overwritten.";
const DOWNLOAD_SELECTION_PROMPT: &str =
    "You will download all your selection, be careful, it will be overwritten.";

/// Which file set an upload trigger draws from.
#[derive(Debug, Clone, Copy)]
enum Candidates {
    OpenFiles,
    Selection,
}

impl DeploymentManager {
    /// Uploads the file currently being edited.
    ///
    /// Does nothing when that file is the configuration file and the
    /// configuration forbids uploading it.
    pub async fn upload_current_file(&self) {
        let Some(config) = self.load_or_dispatch().await else {
            return;
        };
        self.upload_current_file_with(&config).await;
    }

    /// Save hook: uploads the current file if `uploadOnSave` is enabled.
    ///
    /// Configuration failures are reported on the generic error channel.
    pub async fn upload_on_save(&self) {
        let Some(path) = self.resolve_config_path() else {
            return;
        };

        let config = match self.load_config(&path).await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "cannot load configuration for save hook");
                self.notify_error(&e.to_string());
                return;
            }
        };

        if !config.upload_on_save {
            debug!("upload on save disabled");
            return;
        }

        self.upload_current_file_with(&config).await;
    }

    /// Uploads every open file.
    pub async fn upload_open_files(&self) {
        self.upload_candidates(Candidates::OpenFiles).await;
    }

    /// Uploads the current selection.
    pub async fn upload_selection(&self) {
        self.upload_candidates(Candidates::Selection).await;
    }

    /// Overwrites the current file with its remote version, after
    /// confirmation.
    pub async fn download_current_file(&self) {
        if !self.confirm_overwrite(DOWNLOAD_CURRENT_FILE_PROMPT).await {
            return;
        }

        self.notify_observers(SyncEvent::BeginTransfert, None);
        match self.files.get_current_file().await {
            Ok(file) => self.download(vec![file]).await,
            Err(e) => self.dispatch_exception(&e),
        }
    }

    /// Overwrites the selected nodes with their remote version, after
    /// confirmation.
    pub async fn download_selection(&self) {
        if !self.confirm_overwrite(DOWNLOAD_SELECTION_PROMPT).await {
            return;
        }

        self.notify_observers(SyncEvent::BeginTransfert, None);
        match self.files.get_selection().await {
            Ok(nodes) => self.download(nodes).await,
            Err(e) => self.dispatch_exception(&e),
        }
    }

    /// Asks for a transport kind and writes a default configuration file
    /// for it at the project root.
    pub async fn generate_config_file(&self) {
        let Some(path) = self.resolve_config_path() else {
            return;
        };

        let dialog = Dialog::generate_config();
        let answer = self.host.confirm(&dialog).await;
        let Some(Choice::Generate(kind)) = dialog.choice(answer) else {
            debug!("configuration generation cancelled");
            return;
        };

        let config = ConfigBuilder::new(kind).build();
        match self.configs.save_config(&path, &config).await {
            Ok(()) => {
                info!(path = %path.display(), transport = %kind, "configuration file created");
                self.notify_observers(SyncEvent::ConfigurationFileCreationSuccess, None);
            }
            Err(e) => {
                let e = DeployError::from(e);
                warn!(error = %e, "configuration file creation failed");
                self.notify_observers(SyncEvent::ConfigurationFileCreationError, Some(&e));
            }
        }
    }

    async fn upload_current_file_with(&self, config: &SyncConfig) {
        let file = match self.files.get_current_file().await {
            Ok(file) => file,
            Err(e) => {
                self.dispatch_exception(&e);
                return;
            }
        };

        if !config.upload_config_file && is_config_file(&file) {
            debug!(file = %file.relative_path, "skipping configuration file");
            return;
        }

        self.notify_observers(SyncEvent::BeginTransfert, None);
        self.upload(vec![file]).await;
    }

    async fn upload_candidates(&self, candidates: Candidates) {
        let Some(config) = self.load_or_dispatch().await else {
            return;
        };

        let files = match candidates {
            Candidates::OpenFiles => self.files.get_open_files().await,
            Candidates::Selection => self.files.get_selection().await,
        };
        let files = match files {
            Ok(files) => exclude_config_file(&config, files),
            Err(e) => {
                self.dispatch_exception(&e);
                return;
            }
        };

        if files.is_empty() {
            debug!(source = ?candidates, "nothing to upload");
            return;
        }

        self.notify_observers(SyncEvent::BeginTransfert, None);
        self.upload(files).await;
    }

    async fn load_or_dispatch(&self) -> Option<SyncConfig> {
        let path = self.resolve_config_path()?;
        match self.load_config(&path).await {
            Ok(config) => Some(config),
            Err(e) => {
                self.dispatch_exception(&e);
                None
            }
        }
    }

    async fn confirm_overwrite(&self, message: &str) -> bool {
        if self.resolve_config_path().is_none() {
            return false;
        }

        let dialog = Dialog::overwrite(message);
        let answer = self.host.confirm(&dialog).await;
        let approved = dialog.choice(answer) == Some(Choice::Overwrite);
        if !approved {
            debug!("download cancelled");
        }
        approved
    }
}
