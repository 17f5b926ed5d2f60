//! Recursive directory listing.
//!
//! Produces file entries with relative paths normalized to forward
//! slashes, sorted for stable transfer order.

use std::path::Path;

/// A regular file found under a scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path relative to the scanned root, `/`-separated.
    pub relative_path: String,
    pub size: u64,
}

/// Scans a directory recursively. Returns the files and their total size.
pub fn scan_files(root: &Path) -> std::io::Result<(Vec<ScannedFile>, u64)> {
    let mut files = Vec::new();
    let mut total_size = 0;

    walk_dir(root, root, &mut files, &mut total_size)?;
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok((files, total_size))
}

fn walk_dir(
    root: &Path,
    current: &Path,
    files: &mut Vec<ScannedFile>,
    total_size: &mut u64,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            walk_dir(root, &path, files, total_size)?;
        } else if metadata.is_file() {
            let rel_path = path.strip_prefix(root).map_err(std::io::Error::other)?;
            files.push(ScannedFile {
                relative_path: rel_path.to_string_lossy().replace('\\', "/"),
                size: metadata.len(),
            });
            *total_size += metadata.len();
        }
    }

    Ok(())
}
