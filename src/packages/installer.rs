use crate::error::{AutobuildError, Result};
use crate::exec::{Executor, Invocation};
use crate::platform::PackageProfile;
use crate::system::Host;
use crate::ui;

/// What the installer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The platform has no package manager step
    Skipped,
    /// Dry run: reported, not executed
    Planned(Invocation),
    Installed(Invocation),
}

pub struct Installer<'a> {
    host: &'a dyn Host,
    executor: &'a Executor<'a>,
}

impl<'a> Installer<'a> {
    pub fn new(host: &'a dyn Host, executor: &'a Executor<'a>) -> Self {
        Self { host, executor }
    }

    pub fn install(&self, profile: &PackageProfile, dry_run: bool) -> Result<InstallOutcome> {
        let Some(invocation) = profile.install_invocation() else {
            return Ok(InstallOutcome::Skipped);
        };

        if self.host.find_program(&invocation.program).is_none() {
            return Err(AutobuildError::ProgramMissing(invocation.program));
        }

        if dry_run {
            // dry run prints nothing but the install directory
            ui::verbose(&format!(
                "Would install {} packages: {}",
                profile.platform, invocation
            ));
            return Ok(InstallOutcome::Planned(invocation));
        }

        ui::header(&format!("Installing {} packages", profile.platform));
        ui::info(&invocation.to_string());

        if profile.install_as_root {
            self.executor.run_privileged(&invocation)?;
        } else {
            self.executor.run(&invocation)?;
        }

        ui::success("Build dependencies installed");
        Ok(InstallOutcome::Installed(invocation))
    }
}
