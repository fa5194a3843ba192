//! Autotools build of the sources next to the binary.

use crate::error::{AutobuildError, Result};
use crate::exec::{Executor, Invocation};
use crate::system::Host;
use crate::ui;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct BuildDriver<'a> {
    host: &'a dyn Host,
    executor: &'a Executor<'a>,
    source_dir: PathBuf,
    make: String,
}

impl<'a> BuildDriver<'a> {
    pub fn new(
        host: &'a dyn Host,
        executor: &'a Executor<'a>,
        source_dir: impl Into<PathBuf>,
        make: impl Into<String>,
    ) -> Self {
        Self {
            host,
            executor,
            source_dir: source_dir.into(),
            make: make.into(),
        }
    }

    /// Configure, compile and optionally install into `install_dir`.
    ///
    /// Regenerate/configure/make failures come back as [`AutobuildError::BuildFailed`].
    pub fn build(&self, install_dir: Option<&Path>) -> Result<()> {
        self.check_source_dir()?;

        self.ensure_configure()
            .and_then(|_| self.configure(install_dir))
            .and_then(|_| self.compile())
            .map_err(|e| match e {
                AutobuildError::BuildFailed(_) | AutobuildError::Internal(_) => e,
                other => AutobuildError::BuildFailed(other.to_string()),
            })?;

        if let Some(dir) = install_dir {
            self.install(dir)?;
        }

        Ok(())
    }

    pub fn check_source_dir(&self) -> Result<()> {
        if self.source_dir.is_dir() {
            return Ok(());
        }

        let reason = if self.source_dir.exists() {
            "not a directory"
        } else {
            "no such directory"
        };
        Err(AutobuildError::SourceDir {
            path: self.source_dir.clone(),
            reason: reason.to_string(),
        })
    }

    fn configure_script(&self) -> PathBuf {
        self.source_dir.join("configure")
    }

    fn invocation(&self, program: &str) -> Invocation {
        Invocation::new(program).current_dir(&self.source_dir)
    }

    /// Generate `configure` with autoreconf unless it is already there.
    pub fn ensure_configure(&self) -> Result<()> {
        if self.configure_script().is_file() {
            return Ok(());
        }

        if self.host.find_program("autoreconf").is_none() {
            return Err(AutobuildError::ProgramMissing("autoreconf".to_string()));
        }

        ui::info("Generating configure script");
        self.executor.run(&self.invocation("autoreconf").arg("-i"))?;

        if !self.configure_script().is_file() {
            return Err(AutobuildError::BuildFailed(format!(
                "autoreconf did not produce {}",
                self.configure_script().display()
            )));
        }
        Ok(())
    }

    pub fn configure_invocation(&self, install_dir: Option<&Path>) -> Invocation {
        let mut inv = self.invocation("./configure").arg("-q");
        if let Some(dir) = install_dir {
            inv = inv.arg(format!("--bindir={}", dir.display()));
        }
        inv
    }

    pub fn configure(&self, install_dir: Option<&Path>) -> Result<()> {
        ui::info("Configuring");
        self.executor.run(&self.configure_invocation(install_dir))
    }

    pub fn compile(&self) -> Result<()> {
        ui::info("Compiling");
        self.executor.run(&self.invocation(&self.make).arg("-s"))
    }

    /// Create `dir` and run `make install`, elevated when `dir` is not ours.
    pub fn install(&self, dir: &Path) -> Result<()> {
        ui::info(&format!("Installing into {}", dir.display()));

        match fs::create_dir_all(dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                let mkdir = Invocation::new("mkdir")
                    .arg("-p")
                    .arg(dir.display().to_string());
                self.executor.run_privileged(&mkdir)?;
            }
            Err(source) => {
                return Err(AutobuildError::IoError {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        }

        let install = self.invocation(&self.make).args(["-s", "install"]);
        if self.host.is_writable(dir) {
            self.executor.run(&install)
        } else {
            self.executor.run_privileged(&install)
        }
    }
}
