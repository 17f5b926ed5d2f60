//! Mock collaborators shared by the workflow tests.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use sftpsync_config::{ConfigError, ConfigProvider, SyncConfig, TransportKind};

use crate::connection::{Connection, ConnectionProvider};
use crate::error::DeployError;
use crate::events::SyncEvent;
use crate::host::{FileSource, Host};
use crate::manager::DeploymentManager;
use crate::observer::Observer;
use crate::types::{Dialog, FileDescriptor};

pub fn file(path: &str) -> FileDescriptor {
    FileDescriptor::new(path, format!("/project/{path}"))
}

pub fn local_config(upload_config_file: bool) -> SyncConfig {
    SyncConfig {
        transport: TransportKind::Local,
        remote_path: "/remote".into(),
        upload_config_file,
        ..SyncConfig::default()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ConfigFailure {
    NotFound,
    NotReadable,
    Syntax,
}

pub fn not_found() -> ConfigFailure {
    ConfigFailure::NotFound
}

pub fn not_readable() -> ConfigFailure {
    ConfigFailure::NotReadable
}

pub fn syntax_error() -> ConfigFailure {
    ConfigFailure::Syntax
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    Event(SyncEvent, Option<DeployError>),
    Error(String),
}

#[derive(Default)]
pub struct Recorder {
    seen: Mutex<Vec<Seen>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|s| match s {
                Seen::Event(event, _) => Some(event.as_str()),
                Seen::Error(_) => None,
            })
            .collect()
    }
}

impl Observer for Recorder {
    fn notify(&self, event: SyncEvent, payload: Option<&DeployError>) {
        self.seen
            .lock()
            .unwrap()
            .push(Seen::Event(event, payload.cloned()));
    }

    fn notify_error(&self, message: &str) {
        self.seen.lock().unwrap().push(Seen::Error(message.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Config provider
// ---------------------------------------------------------------------------

pub struct MockConfigs {
    result: Mutex<Result<SyncConfig, ConfigFailure>>,
    loaded: Mutex<Vec<PathBuf>>,
    saved: Mutex<Vec<(PathBuf, SyncConfig)>>,
    fail_save: Mutex<bool>,
}

impl MockConfigs {
    pub fn new(result: Result<SyncConfig, ConfigFailure>) -> Self {
        Self {
            result: Mutex::new(result),
            loaded: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
            fail_save: Mutex::new(false),
        }
    }

    pub fn loaded_paths(&self) -> Vec<PathBuf> {
        self.loaded.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<(PathBuf, SyncConfig)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn fail_save(&self) {
        *self.fail_save.lock().unwrap() = true;
    }
}

impl ConfigProvider for MockConfigs {
    fn load_config<'a>(
        &'a self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<SyncConfig, ConfigError>> + Send + 'a>> {
        self.loaded.lock().unwrap().push(path.to_path_buf());
        let result = self.result.lock().unwrap().clone();
        Box::pin(async move {
            let path = path.to_path_buf();
            result.map_err(|failure| match failure {
                ConfigFailure::NotFound => ConfigError::NotFound { path },
                ConfigFailure::NotReadable => ConfigError::NotReadable {
                    path,
                    source: std::io::Error::other("permission denied"),
                },
                ConfigFailure::Syntax => ConfigError::Syntax {
                    path,
                    message: "expected `,` at line 2".into(),
                },
            })
        })
    }

    fn save_config<'a>(
        &'a self,
        path: &'a Path,
        config: &'a SyncConfig,
    ) -> Pin<Box<dyn Future<Output = Result<(), ConfigError>> + Send + 'a>> {
        let fail = *self.fail_save.lock().unwrap();
        if !fail {
            self.saved
                .lock()
                .unwrap()
                .push((path.to_path_buf(), config.clone()));
        }
        Box::pin(async move {
            if fail {
                Err(ConfigError::Write {
                    path: path.to_path_buf(),
                    source: std::io::Error::other("read-only filesystem"),
                })
            } else {
                Ok(())
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TransportState {
    open_error: Option<DeployError>,
    upload_error: Option<DeployError>,
    resolve_error: Option<DeployError>,
    close_error: Option<DeployError>,
    report_failure: bool,
    yield_during_transfer: bool,
    targets: Option<Vec<FileDescriptor>>,
    uploaded: Vec<Vec<FileDescriptor>>,
    downloaded: Vec<Vec<FileDescriptor>>,
    resolved: Vec<Vec<FileDescriptor>>,
    opens: usize,
    closes: usize,
    active: usize,
    max_active: usize,
}

#[derive(Default)]
pub struct MockTransport {
    state: Arc<Mutex<TransportState>>,
}

impl MockTransport {
    pub fn fail_open(&self, e: DeployError) {
        self.state.lock().unwrap().open_error = Some(e);
    }

    pub fn fail_upload(&self, e: DeployError) {
        self.state.lock().unwrap().upload_error = Some(e);
    }

    pub fn fail_resolve(&self, e: DeployError) {
        self.state.lock().unwrap().resolve_error = Some(e);
    }

    pub fn fail_close(&self, e: DeployError) {
        self.state.lock().unwrap().close_error = Some(e);
    }

    pub fn report_failure(&self) {
        self.state.lock().unwrap().report_failure = true;
    }

    pub fn yield_during_transfer(&self) {
        self.state.lock().unwrap().yield_during_transfer = true;
    }

    pub fn set_targets(&self, targets: Vec<FileDescriptor>) {
        self.state.lock().unwrap().targets = Some(targets);
    }

    pub fn uploaded(&self) -> Vec<Vec<FileDescriptor>> {
        self.state.lock().unwrap().uploaded.clone()
    }

    pub fn downloaded(&self) -> Vec<Vec<FileDescriptor>> {
        self.state.lock().unwrap().downloaded.clone()
    }

    pub fn resolved(&self) -> Vec<Vec<FileDescriptor>> {
        self.state.lock().unwrap().resolved.clone()
    }

    pub fn opens(&self) -> usize {
        self.state.lock().unwrap().opens
    }

    pub fn closes(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    pub fn max_concurrent_sessions(&self) -> usize {
        self.state.lock().unwrap().max_active
    }
}

impl ConnectionProvider for MockTransport {
    fn open_connection<'a>(
        &'a self,
        _config: &'a SyncConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Box<dyn Connection>, DeployError>> + Send + 'a>> {
        Box::pin(async move {
            let mut s = self.state.lock().unwrap();
            if let Some(e) = s.open_error.clone() {
                return Err(e);
            }
            s.opens += 1;
            s.active += 1;
            s.max_active = s.max_active.max(s.active);
            let conn: Box<dyn Connection> = Box::new(MockConnection {
                state: self.state.clone(),
            });
            Ok(conn)
        })
    }
}

struct MockConnection {
    state: Arc<Mutex<TransportState>>,
}

impl MockConnection {
    fn should_yield(&self) -> bool {
        self.state.lock().unwrap().yield_during_transfer
    }
}

impl Connection for MockConnection {
    fn upload<'a>(
        &'a mut self,
        files: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + 'a>> {
        Box::pin(async move {
            if self.should_yield() {
                tokio::task::yield_now().await;
            }
            let mut s = self.state.lock().unwrap();
            if let Some(e) = s.upload_error.clone() {
                return Err(e);
            }
            s.uploaded.push(files.to_vec());
            Ok(())
        })
    }

    fn download<'a>(
        &'a mut self,
        files: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + 'a>> {
        Box::pin(async move {
            if self.should_yield() {
                tokio::task::yield_now().await;
            }
            self.state.lock().unwrap().downloaded.push(files.to_vec());
            Ok(())
        })
    }

    fn get_target_files<'a>(
        &'a mut self,
        nodes: &'a [FileDescriptor],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + 'a>>
    {
        Box::pin(async move {
            let mut s = self.state.lock().unwrap();
            if let Some(e) = s.resolve_error.clone() {
                return Err(e);
            }
            s.resolved.push(nodes.to_vec());
            Ok(s.targets.clone().unwrap_or_else(|| nodes.to_vec()))
        })
    }

    fn close(&mut self) -> Pin<Box<dyn Future<Output = Result<bool, DeployError>> + Send + '_>> {
        Box::pin(async move {
            let mut s = self.state.lock().unwrap();
            s.closes += 1;
            s.active -= 1;
            if let Some(e) = s.close_error.clone() {
                return Err(e);
            }
            Ok(!s.report_failure)
        })
    }
}

// ---------------------------------------------------------------------------
// File source and host
// ---------------------------------------------------------------------------

pub struct MockSource {
    pub current: Mutex<Result<FileDescriptor, DeployError>>,
    pub open_files: Mutex<Vec<FileDescriptor>>,
    pub selection: Mutex<Vec<FileDescriptor>>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            current: Mutex::new(Ok(file("a.txt"))),
            open_files: Mutex::new(Vec::new()),
            selection: Mutex::new(Vec::new()),
        }
    }
}

impl FileSource for MockSource {
    fn get_current_file(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<FileDescriptor, DeployError>> + Send + '_>> {
        let current = self.current.lock().unwrap().clone();
        Box::pin(async move { current })
    }

    fn get_open_files(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + '_>> {
        let files = self.open_files.lock().unwrap().clone();
        Box::pin(async move { Ok(files) })
    }

    fn get_selection(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FileDescriptor>, DeployError>> + Send + '_>> {
        let files = self.selection.lock().unwrap().clone();
        Box::pin(async move { Ok(files) })
    }
}

pub struct MockHost {
    root: Option<PathBuf>,
    answer: Mutex<Option<usize>>,
    dialogs: Mutex<Vec<Dialog>>,
}

impl MockHost {
    pub fn answer(&self, index: Option<usize>) {
        *self.answer.lock().unwrap() = index;
    }

    pub fn dialogs(&self) -> Vec<Dialog> {
        self.dialogs.lock().unwrap().clone()
    }
}

impl Host for MockHost {
    fn project_root(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    fn confirm<'a>(
        &'a self,
        dialog: &'a Dialog,
    ) -> Pin<Box<dyn Future<Output = Option<usize>> + Send + 'a>> {
        self.dialogs.lock().unwrap().push(dialog.clone());
        let answer = *self.answer.lock().unwrap();
        Box::pin(async move { answer })
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub manager: DeploymentManager,
    pub configs: Arc<MockConfigs>,
    pub transport: Arc<MockTransport>,
    pub source: Arc<MockSource>,
    pub host: Arc<MockHost>,
    pub recorder: Arc<Recorder>,
}

impl Harness {
    pub fn new(config: SyncConfig) -> Self {
        Self::build(Ok(config), Some(PathBuf::from("/project")))
    }

    pub fn with_config(result: Result<SyncConfig, ConfigFailure>) -> Self {
        Self::build(result, Some(PathBuf::from("/project")))
    }

    pub fn without_project(config: SyncConfig) -> Self {
        Self::build(Ok(config), None)
    }

    fn build(result: Result<SyncConfig, ConfigFailure>, root: Option<PathBuf>) -> Self {
        let configs = Arc::new(MockConfigs::new(result));
        let transport = Arc::new(MockTransport::default());
        let source = Arc::new(MockSource::default());
        let host = Arc::new(MockHost {
            root,
            answer: Mutex::new(Some(0)),
            dialogs: Mutex::new(Vec::new()),
        });
        let recorder = Arc::new(Recorder::default());

        let mut manager = DeploymentManager::new(
            configs.clone(),
            transport.clone(),
            source.clone(),
            host.clone(),
        );
        manager.register_observer(recorder.clone());

        Self {
            manager,
            configs,
            transport,
            source,
            host,
            recorder,
        }
    }
}
