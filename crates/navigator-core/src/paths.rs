use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "navigator.yaml";
pub const DEFAULT_EXPORT_FILE: &str = "reuse-summary.md";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured path against the project root. Absolute paths are
/// returned unchanged.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
