use super::*;
use crate::testing::FakeHost;

fn ctx() -> ProbeContext {
    ProbeContext::new(vec![
        "/opt/tools/autobuild".to_string(),
        "-i".to_string(),
        "/home/me/bin dir".to_string(),
    ])
}

fn matched(host: &FakeHost) -> PackageProfile {
    match probe(host, &ctx()).unwrap() {
        Detection::Matched(profile) => profile,
        Detection::Restart(r) => panic!("unexpected restart: {}", r.invocation),
    }
}

fn restarted(host: &FakeHost) -> Restart {
    match probe(host, &ctx()).unwrap() {
        Detection::Restart(r) => r,
        Detection::Matched(p) => panic!("unexpected match: {}", p.platform),
    }
}

fn install_line(profile: &PackageProfile) -> String {
    profile.install_invocation().unwrap().to_string()
}

#[test]
fn detector_order_is_fixed() {
    let order: Vec<Platform> = detectors().iter().map(|d| d.platform()).collect();
    assert_eq!(
        order,
        vec![
            Platform::NixOs,
            Platform::MacOs,
            Platform::FreeBsd,
            Platform::Arch,
            Platform::CentOs,
            Platform::Fedora,
            Platform::Debian,
            Platform::Msys2,
        ]
    );
}

#[test]
fn unknown_platform_is_fatal() {
    let host = FakeHost::linux();
    let err = probe(&host, &ctx()).unwrap_err();
    assert!(matches!(err, AutobuildError::PlatformNotRecognized));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn debian_profile() {
    let host = FakeHost::linux().with_file("/etc/debian_version", "12.5\n");
    let profile = matched(&host);

    assert_eq!(profile.platform, Platform::Debian);
    assert_eq!(profile.command.as_deref(), Some("apt-get"));
    assert_eq!(profile.args, vec!["install"]);
    assert!(profile.packages.contains(&"libpoppler-glib-dev".to_string()));
    assert!(profile.install_as_root);
    assert_eq!(profile.make, "make");
    assert!(install_line(&profile).starts_with("apt-get install "));
}

#[test]
fn arch_profile() {
    let host = FakeHost::linux().with_file("/etc/arch-release", "");
    let profile = matched(&host);

    assert_eq!(profile.platform, Platform::Arch);
    assert_eq!(
        install_line(&profile),
        "pacman -S --needed base-devel libpng poppler poppler-glib"
    );
    assert!(profile.install_as_root);
}

#[test]
fn centos_profile() {
    let host = FakeHost::linux().with_file("/etc/centos-release", "CentOS Linux release 7");
    let profile = matched(&host);

    assert_eq!(profile.platform, Platform::CentOs);
    assert_eq!(profile.command.as_deref(), Some("yum"));
    assert!(profile.packages.contains(&"poppler-glib-devel".to_string()));
}

#[test]
fn fedora_uses_pkgconf_on_recent_releases() {
    let host = FakeHost::linux()
        .with_file("/etc/fedora-release", "Fedora release 39")
        .with_file("/etc/os-release", "ID=fedora\nVERSION_ID=39\n");
    let profile = matched(&host);

    assert_eq!(profile.command.as_deref(), Some("dnf"));
    assert!(profile.packages.contains(&"pkgconf".to_string()));
    assert!(!profile.packages.contains(&"pkgconfig".to_string()));
}

#[test]
fn fedora_uses_pkgconfig_on_old_releases() {
    let host = FakeHost::linux()
        .with_file("/etc/fedora-release", "Fedora release 25")
        .with_file("/etc/os-release", "VERSION_ID=\"25\"\n");
    let profile = matched(&host);

    assert!(profile.packages.contains(&"pkgconfig".to_string()));
}

#[test]
fn fedora_without_os_release_defaults_to_pkgconf() {
    let host = FakeHost::linux().with_file("/etc/fedora-release", "");
    assert!(matched(&host).packages.contains(&"pkgconf".to_string()));
}

#[test]
fn macos_uses_brew_without_root() {
    let host = FakeHost::linux()
        .with_os("macos")
        .with_file("/etc/debian_version", "");
    let profile = matched(&host);

    assert_eq!(profile.platform, Platform::MacOs);
    assert_eq!(profile.command.as_deref(), Some("brew"));
    assert!(!profile.install_as_root);
}

#[test]
fn freebsd_uses_gmake() {
    let host = FakeHost::linux().with_os("freebsd");
    let profile = matched(&host);

    assert_eq!(profile.command.as_deref(), Some("pkg"));
    assert_eq!(profile.args, vec!["install", "-y"]);
    assert_eq!(profile.make, "gmake");
    assert!(profile.install_as_root);
}

#[test]
fn first_match_wins_over_later_markers() {
    let host = FakeHost::linux()
        .with_file("/etc/arch-release", "")
        .with_file("/etc/debian_version", "");
    assert_eq!(matched(&host).platform, Platform::Arch);
}

#[test]
fn nixos_inside_shell_needs_no_package_manager() {
    let host = FakeHost::linux()
        .with_programs(&["nix-shell"])
        .with_file("/etc/debian_version", "")
        .with_var("AUTOBUILD_NIX_SHELL", "1");
    let profile = matched(&host);

    assert_eq!(profile.platform, Platform::NixOs);
    assert!(profile.command.is_none());
    assert!(profile.install_invocation().is_none());
}

#[test]
fn nixos_restarts_inside_nix_shell() {
    let host = FakeHost::linux()
        .with_file("/etc/debian_version", "")
        .with_programs(&["nix-shell"]);
    let restart = restarted(&host);
    let inv = &restart.invocation;

    assert_eq!(restart.platform, Platform::NixOs);
    assert_eq!(inv.program, "nix-shell");
    assert_eq!(inv.args[0], "-p");
    assert!(inv.args.contains(&"autoconf".to_string()));
    assert!(
        inv.env
            .contains(&("AUTOBUILD_NIX_SHELL".to_string(), "1".to_string()))
    );

    let run_pos = inv.args.iter().position(|a| a == "--run").unwrap();
    let script = &inv.args[run_pos + 1];
    assert_eq!(shlex::split(script), Some(ctx().argv));
}

#[test]
fn nix_shell_on_path_wins_over_distribution_markers() {
    let host = FakeHost::linux()
        .with_file("/etc/debian_version", "12.5\n")
        .with_programs(&["nix-shell", "apt-get"]);
    assert_eq!(restarted(&host).platform, Platform::NixOs);
}

#[test]
fn without_nix_shell_detection_falls_through() {
    let host = FakeHost::linux().with_file("/etc/debian_version", "");
    assert_eq!(matched(&host).platform, Platform::Debian);

    let bare = FakeHost::linux();
    assert!(matches!(
        probe(&bare, &ctx()).unwrap_err(),
        AutobuildError::PlatformNotRecognized
    ));
}

#[test]
fn nixos_dry_run_does_not_enter_the_shell() {
    let host = FakeHost::linux().with_programs(&["nix-shell"]);
    match probe(&host, &ctx().dry_run(true)).unwrap() {
        Detection::Matched(profile) => {
            assert_eq!(profile.platform, Platform::NixOs);
            assert!(profile.install_invocation().is_none());
        }
        Detection::Restart(r) => panic!("dry run restarted: {}", r.invocation),
    }
}

#[test]
fn msys_subsystem_is_normalised_through_login_shell() {
    let host = FakeHost::linux()
        .with_os("windows")
        .with_var("MSYSTEM", "MSYS")
        .with_file("/etc/profile", "")
        .with_programs(&["bash"]);
    let restart = restarted(&host);
    let inv = &restart.invocation;

    assert_eq!(inv.program, "bash");
    assert_eq!(inv.args[..2], ["--login".to_string(), "-c".to_string()]);
    assert_eq!(shlex::split(&inv.args[2]), Some(ctx().argv));
    assert!(inv.env.contains(&("MSYSTEM".to_string(), "MINGW64".to_string())));
    assert!(inv.env.contains(&("CHERE_INVOKING".to_string(), "1".to_string())));
}

#[test]
fn msys_on_32_bit_host_becomes_mingw32() {
    let host = FakeHost::linux()
        .with_os("windows")
        .with_arch("x86")
        .with_var("MSYSTEM", "MSYS");
    let restart = restarted(&host);

    // no /etc/profile: plain re-exec of the same argument vector
    assert_eq!(restart.invocation.argv(), ctx().argv);
    assert!(
        restart
            .invocation
            .env
            .contains(&("MSYSTEM".to_string(), "MINGW32".to_string()))
    );
}

#[test]
fn mingw64_profile() {
    let host = FakeHost::linux()
        .with_os("windows")
        .with_var("MSYSTEM", "MINGW64");
    let profile = matched(&host);

    assert_eq!(profile.platform, Platform::Msys2);
    assert_eq!(profile.command.as_deref(), Some("pacman"));
    assert_eq!(profile.args, vec!["-S", "--needed"]);
    assert_eq!(profile.packages[0], "base-devel");
    assert!(
        profile
            .packages
            .contains(&"mingw-w64-x86_64-poppler".to_string())
    );
    assert!(!profile.install_as_root);
    assert_eq!(
        profile.default_install_dir,
        Some(PathBuf::from("/mingw64/bin"))
    );
}

#[test]
fn mingw32_packages_use_i686_prefix() {
    let host = FakeHost::linux().with_var("MSYSTEM", "MINGW32");
    let profile = matched(&host);
    assert!(
        profile
            .packages
            .contains(&"mingw-w64-i686-toolchain".to_string())
    );
}

#[test]
fn unsupported_msystem_is_not_recognized() {
    let host = FakeHost::linux().with_var("MSYSTEM", "ARM64X");
    assert!(matches!(
        probe(&host, &ctx()).unwrap_err(),
        AutobuildError::PlatformNotRecognized
    ));
}
