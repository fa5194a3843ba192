//! POSIX shell quoting for commands that must travel as a single string
//! (`su -c`, `nix-shell --run`, `bash -c`).

use crate::error::{AutobuildError, Result};

/// Join `argv` into one string that a POSIX shell splits back into `argv`.
///
/// Fails only for arguments containing a NUL byte, which no shell can carry.
pub fn quote_command<S: AsRef<str>>(argv: &[S]) -> Result<String> {
    shlex::try_join(argv.iter().map(|a| a.as_ref())).map_err(|e| {
        AutobuildError::ConfigError(format!("Cannot quote command for the shell: {}", e))
    })
}
