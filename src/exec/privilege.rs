//! Privilege-aware command execution.
//!
//! A command that needs root runs directly when the filesystem root is
//! already writable, through `sudo` when available, and through `su -c`
//! as a last resort.

use super::{Invocation, Runner, quote_command};
use crate::error::{AutobuildError, Result};
use crate::system::Host;
use crate::ui;

/// How a privileged command will be run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Elevation {
    /// Already privileged
    Direct,
    Sudo,
    Su,
}

/// Commands to run for one privileged invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatedPlan {
    pub elevation: Elevation,
    pub command: Invocation,
    /// Runs after `command` whatever its outcome
    pub cleanup: Option<Invocation>,
}

pub struct Executor<'a> {
    host: &'a dyn Host,
    runner: &'a dyn Runner,
}

impl<'a> Executor<'a> {
    pub fn new(host: &'a dyn Host, runner: &'a dyn Runner) -> Self {
        Self { host, runner }
    }

    /// Elevation mechanism for this host, `None` when there is none.
    pub fn elevation(&self) -> Option<Elevation> {
        if self.host.is_writable(self.host.root()) {
            Some(Elevation::Direct)
        } else if self.host.find_program("sudo").is_some() {
            Some(Elevation::Sudo)
        } else if self.host.find_program("su").is_some() {
            Some(Elevation::Su)
        } else {
            None
        }
    }

    pub fn plan(&self, invocation: &Invocation) -> Result<ElevatedPlan> {
        check_not_empty(invocation)?;

        let elevation = self
            .elevation()
            .ok_or_else(|| AutobuildError::NoElevation(invocation.program.clone()))?;

        let (command, cleanup) = match elevation {
            Elevation::Direct => (invocation.clone(), None),
            Elevation::Sudo => {
                let command = Invocation {
                    program: "sudo".to_string(),
                    args: elevated_argv(invocation),
                    cwd: invocation.cwd.clone(),
                    env: Vec::new(),
                };
                (command, Some(Invocation::new("sudo").arg("-k")))
            }
            Elevation::Su => {
                let command = Invocation {
                    program: "su".to_string(),
                    args: vec!["-c".to_string(), quote_command(&elevated_argv(invocation))?],
                    cwd: invocation.cwd.clone(),
                    env: Vec::new(),
                };
                (command, None)
            }
        };

        Ok(ElevatedPlan {
            elevation,
            command,
            cleanup,
        })
    }

    /// Run as the current user
    pub fn run(&self, invocation: &Invocation) -> Result<()> {
        check_not_empty(invocation)?;
        self.runner.run(invocation)
    }

    /// Run with superuser rights, elevating only when needed
    pub fn run_privileged(&self, invocation: &Invocation) -> Result<()> {
        let plan = self.plan(invocation)?;

        let result = self.runner.run(&plan.command);

        if let Some(cleanup) = &plan.cleanup {
            if let Err(e) = self.runner.run(cleanup) {
                ui::warning(&format!("Failed to drop cached credentials: {}", e));
            }
        }

        result
    }
}

/// Argument vector for the elevated side. `sudo` resets the environment,
/// so variables travel as `env K=V` in front of the command.
fn elevated_argv(invocation: &Invocation) -> Vec<String> {
    if invocation.env.is_empty() {
        return invocation.argv();
    }

    std::iter::once("env".to_string())
        .chain(invocation.env.iter().map(|(k, v)| format!("{}={}", k, v)))
        .chain(invocation.argv())
        .collect()
}

fn check_not_empty(invocation: &Invocation) -> Result<()> {
    if invocation.program.trim().is_empty() {
        return Err(AutobuildError::Internal(
            "empty command handed to the executor".to_string(),
        ));
    }
    Ok(())
}
