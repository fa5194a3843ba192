//! Settings Module
//!
//! Runtime settings read once from `AUTOBUILD_*` environment variables.

use crate::error::{AutobuildError, Result};
use crate::project_identity::env_key;
use std::path::PathBuf;

/// Immutable settings passed down the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Filesystem root used for marker files and the writability check
    pub root: PathBuf,
    /// Directory holding the autotools sources
    pub source_dir: PathBuf,
    pub verbose: bool,
    pub quiet: bool,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = match non_empty(lookup(&env_key("ROOT"))) {
            Some(root) => PathBuf::from(root),
            None => PathBuf::from("/"),
        };

        let source_dir = match non_empty(lookup(&env_key("SOURCE_DIR"))) {
            Some(dir) => PathBuf::from(dir),
            None => default_source_dir()?,
        };

        let verbose = parse_flag(&env_key("VERBOSE"), lookup(&env_key("VERBOSE")))?;
        let quiet = parse_flag(&env_key("QUIET"), lookup(&env_key("QUIET")))?;

        Ok(Self {
            root,
            source_dir,
            verbose,
            quiet,
        })
    }
}

/// The sources live next to the binary, like a script sitting in its own tree.
fn default_source_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| {
        AutobuildError::ConfigError(format!("Cannot locate the running executable: {}", e))
    })?;

    exe.parent().map(|p| p.to_path_buf()).ok_or_else(|| {
        AutobuildError::ConfigError(format!(
            "Executable path has no parent directory: {}",
            exe.display()
        ))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    let Some(value) = non_empty(value) else {
        return Ok(false);
    };

    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AutobuildError::ConfigError(format!(
            "Invalid value for {}: '{}' (expected true/false)",
            key, other
        ))),
    }
}
