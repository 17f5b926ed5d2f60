//! sftpsync command-line entry point.

mod cli;
mod console;
mod host;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sftpsync_config::JsonConfigProvider;
use sftpsync_deploy::{DeploymentManager, TracingObserver};
use sftpsync_transport_local::LocalConnectionProvider;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::console::ConsoleObserver;
use crate::host::{ArgsFileSource, TerminalHost};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project = match cli.project {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let project = project
        .canonicalize()
        .with_context(|| format!("project directory {} not found", project.display()))?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        project = %project.display(),
        "starting sftpsync"
    );

    let source = ArgsFileSource::new(&project, cli.command.paths())?;
    let console = Arc::new(ConsoleObserver::default());

    let mut manager = DeploymentManager::new(
        Arc::new(JsonConfigProvider::new()),
        Arc::new(LocalConnectionProvider::new(&project)),
        Arc::new(source),
        Arc::new(TerminalHost::new(project.clone(), cli.yes)),
    );
    manager.register_observer(Arc::new(TracingObserver));
    manager.register_observer(console.clone());

    match cli.command {
        Command::Upload { .. } => manager.upload_open_files().await,
        Command::UploadCurrent { .. } => manager.upload_current_file().await,
        Command::OnSave { .. } => manager.upload_on_save().await,
        Command::Download { .. } => manager.download_selection().await,
        Command::DownloadCurrent { .. } => manager.download_current_file().await,
        Command::Init => manager.generate_config_file().await,
    }

    if console.failed() {
        anyhow::bail!("sync finished with errors");
    }
    Ok(())
}
