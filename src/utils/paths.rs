use crate::platform::PackageProfile;
use directories::BaseDirs;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Per-user executable directory (`$XDG_BIN_HOME` or `~/.local/bin`)
pub fn user_bin_dir() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    match base.executable_dir() {
        Some(dir) => Some(dir.to_path_buf()),
        None => Some(base.home_dir().join(".local").join("bin")),
    }
}

/// Where `-I` installs: the platform's own directory, else the user's bin dir.
pub fn default_install_dir(profile: &PackageProfile) -> Option<PathBuf> {
    profile.default_install_dir.clone().or_else(user_bin_dir)
}

/// Make `path` absolute against `cwd` without touching the filesystem.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Whether two paths name the same directory, following symlinks when they exist.
pub fn same_location(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
