//! Host platform detection.
//!
//! Detectors are tried in a fixed priority order and the first match wins:
//!
//! NixOS → macOS → FreeBSD → Arch → CentOS → Fedora → Debian/Ubuntu → Msys2
//!
//! NixOS comes first because NixOS hosts can carry files that look like
//! other distributions (`/etc/debian_version` for instance); it is
//! recognised by `nix-shell` being on PATH. Msys2 comes
//! last since it is only recognised through `MSYSTEM`.

mod detectors;
mod os_release;
mod packages;

pub use detectors::{
    ArchDetector, CentOsDetector, DebianDetector, FedoraDetector, FreeBsdDetector, MacOsDetector,
    Msys2Detector, NixOsDetector,
};

use crate::error::{AutobuildError, Result};
use crate::exec::Invocation;
use crate::system::Host;
use crate::ui;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    NixOs,
    MacOs,
    FreeBsd,
    Arch,
    CentOs,
    Fedora,
    Debian,
    Msys2,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::NixOs => "NixOS",
            Platform::MacOs => "macOS",
            Platform::FreeBsd => "FreeBSD",
            Platform::Arch => "Arch Linux",
            Platform::CentOs => "CentOS",
            Platform::Fedora => "Fedora",
            Platform::Debian => "Debian/Ubuntu",
            Platform::Msys2 => "Msys2",
        };
        f.write_str(name)
    }
}

/// Package manager profile of the detected platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageProfile {
    pub platform: Platform,
    /// `None` when nothing needs installing
    pub command: Option<String>,
    pub args: Vec<String>,
    pub packages: Vec<String>,
    pub install_as_root: bool,
    pub make: String,
    /// Platform specific target for `-I`
    pub default_install_dir: Option<PathBuf>,
}

impl PackageProfile {
    pub fn new(platform: Platform, command: &str, args: &[&str], packages: &[&str]) -> Self {
        Self {
            platform,
            command: Some(command.to_string()),
            args: args.iter().map(|a| a.to_string()).collect(),
            packages: packages.iter().map(|p| p.to_string()).collect(),
            install_as_root: false,
            make: "make".to_string(),
            default_install_dir: None,
        }
    }

    /// A platform whose dependencies are already provided
    pub fn without_package_manager(platform: Platform) -> Self {
        Self {
            platform,
            command: None,
            args: Vec::new(),
            packages: Vec::new(),
            install_as_root: false,
            make: "make".to_string(),
            default_install_dir: None,
        }
    }

    pub fn as_root(mut self) -> Self {
        self.install_as_root = true;
        self
    }

    pub fn with_make(mut self, make: &str) -> Self {
        self.make = make.to_string();
        self
    }

    /// `<command> <args...> <packages...>`, if there is a package manager
    pub fn install_invocation(&self) -> Option<Invocation> {
        let command = self.command.as_deref().filter(|c| !c.is_empty())?;
        Some(
            Invocation::new(command)
                .args(self.args.iter().cloned())
                .args(self.packages.iter().cloned()),
        )
    }
}

/// Restart of the whole program in a different environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restart {
    pub platform: Platform,
    pub invocation: Invocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Matched(PackageProfile),
    Restart(Restart),
}

/// What detectors may need besides the host
#[derive(Debug, Clone, Default)]
pub struct ProbeContext {
    /// Argument vector to restart with; `argv[0]` is the program
    pub argv: Vec<String>,
    /// Detectors must not restart into environments that install anything
    pub dry_run: bool,
}

impl ProbeContext {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

pub trait PlatformDetector {
    fn platform(&self) -> Platform;

    /// `Ok(None)` when the host is not this platform
    fn detect(&self, host: &dyn Host, ctx: &ProbeContext) -> Result<Option<Detection>>;
}

/// All detectors in priority order
pub fn detectors() -> Vec<Box<dyn PlatformDetector>> {
    vec![
        Box::new(NixOsDetector),
        Box::new(MacOsDetector),
        Box::new(FreeBsdDetector),
        Box::new(ArchDetector),
        Box::new(CentOsDetector),
        Box::new(FedoraDetector),
        Box::new(DebianDetector),
        Box::new(Msys2Detector),
    ]
}

/// Identify the host. Exactly one detector answers, or the platform is unknown.
pub fn probe(host: &dyn Host, ctx: &ProbeContext) -> Result<Detection> {
    for detector in detectors() {
        ui::verbose(&format!("Checking for {}", detector.platform()));
        if let Some(detection) = detector.detect(host, ctx)? {
            return Ok(detection);
        }
    }
    Err(AutobuildError::PlatformNotRecognized)
}

#[cfg(test)]
mod tests;
