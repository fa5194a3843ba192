//! Read-only view of the machine the pipeline runs on.
//!
//! Detectors, the executor and the build driver only look at the host
//! through [`Host`], so every platform branch can be exercised in tests.

use std::fs;
use std::path::{Path, PathBuf};

pub trait Host {
    /// Rust's OS identifier (`linux`, `macos`, `freebsd`, `windows`, ...)
    fn os(&self) -> &str;

    /// Rust's architecture identifier (`x86_64`, `x86`, `aarch64`, ...)
    fn arch(&self) -> &str;

    fn var(&self, key: &str) -> Option<String>;

    /// Filesystem root the absolute marker paths are resolved against
    fn root(&self) -> &Path;

    /// `path` is absolute (`/etc/arch-release`) and resolved under [`Host::root`]
    fn file_exists(&self, path: &str) -> bool;

    fn read_file(&self, path: &str) -> Option<String>;

    fn find_program(&self, name: &str) -> Option<PathBuf>;

    fn is_writable(&self, path: &Path) -> bool;

    /// Non-empty environment variable
    fn var_set(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }
}

/// The real machine
pub struct SystemHost {
    root: PathBuf,
}

impl SystemHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Host for SystemHost {
    fn os(&self) -> &str {
        std::env::consts::OS
    }

    fn arch(&self) -> &str {
        std::env::consts::ARCH
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn read_file(&self, path: &str) -> Option<String> {
        fs::read_to_string(self.resolve(path)).ok()
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn is_writable(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            use nix::unistd::{AccessFlags, access};
            access(path, AccessFlags::W_OK).is_ok()
        }

        #[cfg(not(unix))]
        {
            fs::metadata(path)
                .map(|m| !m.permissions().readonly())
                .unwrap_or(false)
        }
    }
}
