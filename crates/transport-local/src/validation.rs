use std::path::{Component, Path};

/// Validates that a relative file path does not escape its base directory.
///
/// Rejects:
/// - Empty paths
/// - Absolute paths (Unix `/` or Windows `C:\`)
/// - Parent directory traversal (`..`)
/// - Windows prefix components (`C:`, `\\server`)
pub fn validate_relative_path(file_path: &str) -> Result<(), String> {
    if file_path.is_empty() {
        return Err("empty path".into());
    }

    let path = Path::new(file_path);
    if path.is_absolute() {
        return Err(format!("absolute path not allowed: {file_path}"));
    }

    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(format!("parent directory traversal not allowed: {file_path}"));
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(format!("absolute path not allowed: {file_path}"));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}
