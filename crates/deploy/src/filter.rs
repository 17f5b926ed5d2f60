//! Configuration-file exclusion policy.

use sftpsync_config::{CONFIG_FILE_NAME, SyncConfig};

use crate::types::FileDescriptor;

/// Whether `file` is the project configuration file.
pub fn is_config_file(file: &FileDescriptor) -> bool {
    file.relative_path == CONFIG_FILE_NAME
}

/// Drops the configuration file from `files` unless the config allows
/// uploading it. Order of the remaining files is preserved.
pub fn exclude_config_file(config: &SyncConfig, files: Vec<FileDescriptor>) -> Vec<FileDescriptor> {
    if config.upload_config_file {
        return files;
    }
    files.into_iter().filter(|f| !is_config_file(f)).collect()
}
