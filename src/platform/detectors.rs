use super::os_release::version_id;
use super::packages;
use super::{Detection, PackageProfile, Platform, PlatformDetector, ProbeContext, Restart};
use crate::error::{AutobuildError, Result};
use crate::exec::{Invocation, quote_command};
use crate::project_identity::NIX_SHELL_SENTINEL;
use crate::system::Host;
use std::path::PathBuf;

fn matched(profile: PackageProfile) -> Result<Option<Detection>> {
    Ok(Some(Detection::Matched(profile)))
}

fn restart(platform: Platform, invocation: Invocation) -> Result<Option<Detection>> {
    Ok(Some(Detection::Restart(Restart {
        platform,
        invocation,
    })))
}

fn require_program(host: &dyn Host, name: &str) -> Result<()> {
    match host.find_program(name) {
        Some(_) => Ok(()),
        None => Err(AutobuildError::ProgramMissing(name.to_string())),
    }
}

fn restart_argv(ctx: &ProbeContext) -> Result<&[String]> {
    if ctx.argv.is_empty() {
        return Err(AutobuildError::Internal(
            "no argument vector to restart with".to_string(),
        ));
    }
    Ok(&ctx.argv)
}

/// NixOS: dependencies come from a `nix-shell` the whole run restarts in.
pub struct NixOsDetector;

impl PlatformDetector for NixOsDetector {
    fn platform(&self) -> Platform {
        Platform::NixOs
    }

    fn detect(&self, host: &dyn Host, ctx: &ProbeContext) -> Result<Option<Detection>> {
        if host.var_set(NIX_SHELL_SENTINEL).is_some() {
            return matched(PackageProfile::without_package_manager(Platform::NixOs));
        }

        if host.find_program("nix-shell").is_none() {
            return Ok(None);
        }

        // Entering the shell fetches packages into the Nix store
        if ctx.dry_run {
            return matched(PackageProfile::without_package_manager(Platform::NixOs));
        }

        let script = quote_command(restart_argv(ctx)?)?;

        let invocation = Invocation::new("nix-shell")
            .arg("-p")
            .args(packages::NIX.iter().copied())
            .arg("--run")
            .arg(script)
            .env(NIX_SHELL_SENTINEL, "1");

        restart(Platform::NixOs, invocation)
    }
}

pub struct MacOsDetector;

impl PlatformDetector for MacOsDetector {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    fn detect(&self, host: &dyn Host, _ctx: &ProbeContext) -> Result<Option<Detection>> {
        if host.os() != "macos" {
            return Ok(None);
        }
        // Homebrew refuses to run as root
        matched(PackageProfile::new(
            Platform::MacOs,
            "brew",
            &["install"],
            packages::MACOS,
        ))
    }
}

pub struct FreeBsdDetector;

impl PlatformDetector for FreeBsdDetector {
    fn platform(&self) -> Platform {
        Platform::FreeBsd
    }

    fn detect(&self, host: &dyn Host, _ctx: &ProbeContext) -> Result<Option<Detection>> {
        if host.os() != "freebsd" {
            return Ok(None);
        }
        matched(
            PackageProfile::new(
                Platform::FreeBsd,
                "pkg",
                &["install", "-y"],
                packages::FREEBSD,
            )
            .as_root()
            .with_make("gmake"),
        )
    }
}

pub struct ArchDetector;

impl PlatformDetector for ArchDetector {
    fn platform(&self) -> Platform {
        Platform::Arch
    }

    fn detect(&self, host: &dyn Host, _ctx: &ProbeContext) -> Result<Option<Detection>> {
        if !host.file_exists("/etc/arch-release") {
            return Ok(None);
        }
        matched(
            PackageProfile::new(
                Platform::Arch,
                "pacman",
                &["-S", "--needed"],
                packages::ARCH,
            )
            .as_root(),
        )
    }
}

pub struct CentOsDetector;

impl PlatformDetector for CentOsDetector {
    fn platform(&self) -> Platform {
        Platform::CentOs
    }

    fn detect(&self, host: &dyn Host, _ctx: &ProbeContext) -> Result<Option<Detection>> {
        if !host.file_exists("/etc/centos-release") {
            return Ok(None);
        }
        matched(
            PackageProfile::new(Platform::CentOs, "yum", &["install"], packages::CENTOS).as_root(),
        )
    }
}

/// Fedora: the pkg-config provider depends on the release.
pub struct FedoraDetector;

impl FedoraDetector {
    fn pkg_config_package(host: &dyn Host) -> &'static str {
        let version = host
            .read_file("/etc/os-release")
            .and_then(|content| version_id(&content));

        match version {
            Some(v) if v < packages::FEDORA_PKGCONF_SINCE => "pkgconfig",
            _ => "pkgconf",
        }
    }
}

impl PlatformDetector for FedoraDetector {
    fn platform(&self) -> Platform {
        Platform::Fedora
    }

    fn detect(&self, host: &dyn Host, _ctx: &ProbeContext) -> Result<Option<Detection>> {
        if !host.file_exists("/etc/fedora-release") {
            return Ok(None);
        }

        let mut profile =
            PackageProfile::new(Platform::Fedora, "dnf", &["install"], packages::FEDORA).as_root();
        profile
            .packages
            .push(Self::pkg_config_package(host).to_string());

        matched(profile)
    }
}

pub struct DebianDetector;

impl PlatformDetector for DebianDetector {
    fn platform(&self) -> Platform {
        Platform::Debian
    }

    fn detect(&self, host: &dyn Host, _ctx: &ProbeContext) -> Result<Option<Detection>> {
        if !host.file_exists("/etc/debian_version") {
            return Ok(None);
        }
        matched(
            PackageProfile::new(Platform::Debian, "apt-get", &["install"], packages::DEBIAN)
                .as_root(),
        )
    }
}

/// Msys2: recognised through `MSYSTEM`; the bare `MSYS` subsystem is
/// normalised to a MinGW one before anything else happens.
pub struct Msys2Detector;

impl Msys2Detector {
    /// Package name prefix for a subsystem
    fn package_prefix(msystem: &str) -> Option<&'static str> {
        match msystem {
            "MINGW64" => Some("mingw-w64-x86_64-"),
            "MINGW32" => Some("mingw-w64-i686-"),
            "UCRT64" => Some("mingw-w64-ucrt-x86_64-"),
            "CLANG64" => Some("mingw-w64-clang-x86_64-"),
            _ => None,
        }
    }

    fn mingw_for_arch(arch: &str) -> &'static str {
        match arch {
            "x86" => "MINGW32",
            _ => "MINGW64",
        }
    }

    fn restart_invocation(host: &dyn Host, ctx: &ProbeContext, msystem: &str) -> Result<Invocation> {
        let argv = restart_argv(ctx)?;

        // A login shell re-reads /etc/profile, which sets PATH for the subsystem
        let invocation = if host.file_exists("/etc/profile") {
            require_program(host, "bash")?;
            Invocation::new("bash")
                .arg("--login")
                .arg("-c")
                .arg(quote_command(argv)?)
                .env("CHERE_INVOKING", "1")
        } else {
            Invocation::new(argv[0].clone()).args(argv[1..].iter().cloned())
        };

        Ok(invocation.env("MSYSTEM", msystem))
    }
}

impl PlatformDetector for Msys2Detector {
    fn platform(&self) -> Platform {
        Platform::Msys2
    }

    fn detect(&self, host: &dyn Host, ctx: &ProbeContext) -> Result<Option<Detection>> {
        let Some(msystem) = host.var_set("MSYSTEM") else {
            return Ok(None);
        };

        if msystem == "MSYS" {
            let target = Self::mingw_for_arch(host.arch());
            return restart(
                Platform::Msys2,
                Self::restart_invocation(host, ctx, target)?,
            );
        }

        let Some(prefix) = Self::package_prefix(&msystem) else {
            return Ok(None);
        };

        let packages: Vec<String> = std::iter::once("base-devel".to_string())
            .chain(packages::MSYS2.iter().map(|p| format!("{}{}", prefix, p)))
            .collect();

        let mut profile =
            PackageProfile::new(Platform::Msys2, "pacman", &["-S", "--needed"], &[]);
        profile.packages = packages;
        profile.default_install_dir =
            Some(PathBuf::from(format!("/{}/bin", msystem.to_lowercase())));

        matched(profile)
    }
}
