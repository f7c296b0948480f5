//! File system utilities

use std::path::Path;

/// Shortens long paths for display
pub fn shorten_path(path: &str, max_length: usize) -> String {
    if path.len() <= max_length {
        return path.to_string();
    }

    let components: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if components.len() <= 2 {
        return path.to_string();
    }

    // Keep the file and its parent
    format!(
        ".../{}/{}",
        components[components.len() - 2],
        components[components.len() - 1]
    )
}

/// Size of a working-tree file, `None` if it is gone or not a regular file
pub fn file_size(workdir: &Path, relative: &str) -> Option<u64> {
    std::fs::metadata(workdir.join(relative))
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
}
