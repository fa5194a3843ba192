use super::Invocation;
use crate::error::{AutobuildError, Result};
use crate::ui;
use std::process::ExitStatus;

/// Spawns subprocesses. Every external program goes through a runner.
pub trait Runner {
    /// Run to completion; a non-zero exit is an error.
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Replace the current process with `invocation`.
    ///
    /// Returns the exit code to terminate with on platforms without `exec`.
    fn replace(&self, invocation: &Invocation) -> Result<i32>;
}

/// Runs commands on the real system with inherited stdio
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let line = invocation.to_string();
        ui::command(&line);

        let status = invocation
            .to_command()
            .status()
            .map_err(|e| AutobuildError::SystemCommandFailed {
                command: line.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AutobuildError::SystemCommandFailed {
                command: line,
                reason: describe_status(status),
            })
        }
    }

    fn replace(&self, invocation: &Invocation) -> Result<i32> {
        let line = invocation.to_string();
        ui::command(&line);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;

            // exec only returns on failure
            let err = invocation.to_command().exec();
            Err(AutobuildError::SystemCommandFailed {
                command: line,
                reason: err.to_string(),
            })
        }

        #[cfg(not(unix))]
        {
            let status = invocation.to_command().status().map_err(|e| {
                AutobuildError::SystemCommandFailed {
                    command: line,
                    reason: e.to_string(),
                }
            })?;
            Ok(status.code().unwrap_or(1))
        }
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}
