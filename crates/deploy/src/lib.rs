//! Deployment orchestration for project file sync.
//!
//! This crate implements the **control flow** of uploading and
//! downloading project files to a remote target. It has no transport or
//! UI dependencies: hosts provide implementations of the collaborator
//! traits and register observers to receive outcomes.
//!
//! # Workflow
//!
//! 1. **Config** — load `atom-sftp-sync.json` from the project root
//! 2. **Filter** — drop the configuration file unless it may be uploaded
//! 3. **Connect** — open a session through the [`ConnectionProvider`]
//! 4. **Transfer** — upload files, or resolve and download nodes
//! 5. **Close** — release the session on every path
//! 6. **Notify** — emit exactly one terminal event to the observers

pub mod connection;
pub mod error;
pub mod events;
pub mod filter;
pub mod host;
pub mod manager;
pub mod observer;
#[cfg(test)]
mod test_support;
mod triggers;
pub mod types;

pub use connection::{Connection, ConnectionProvider};
pub use error::DeployError;
pub use events::SyncEvent;
pub use filter::{exclude_config_file, is_config_file};
pub use host::{FileSource, Host};
pub use manager::DeploymentManager;
pub use observer::{ChannelObserver, ObservedEvent, Observer, ObserverRegistry, TracingObserver};
pub use types::{Choice, Dialog, DialogButton, FileDescriptor};

pub use sftpsync_config::{CONFIG_FILE_NAME, ConfigProvider, SyncConfig, TransportKind};
