use crate::build::BuildDriver;
use crate::cli::args::{Cli, InstallTarget, Options};
use crate::config::Settings;
use crate::error::{AutobuildError, Result};
use crate::exec::{Executor, Runner, SystemRunner};
use crate::packages::Installer;
use crate::platform::{self, Detection, ProbeContext};
use crate::system::{Host, SystemHost};
use crate::ui;
use crate::utils::paths;

/// Run the pipeline for parsed arguments. Returns the process exit code.
pub fn dispatch(cli: &Cli, settings: &Settings, args: &[String]) -> Result<i32> {
    let cwd = std::env::current_dir().map_err(|source| AutobuildError::IoError {
        path: ".".into(),
        source,
    })?;

    let options = Options::from_cli(cli, &cwd);
    let host = SystemHost::new(&settings.root);

    run_pipeline(&options, settings, &host, &SystemRunner, &restart_argv(args))
}

/// Probe, install dependencies, build.
pub fn run_pipeline(
    options: &Options,
    settings: &Settings,
    host: &dyn Host,
    runner: &dyn Runner,
    argv: &[String],
) -> Result<i32> {
    if options.dry_run {
        // stdout carries only the install directory
        ui::set_quiet(true);
    }

    let profile = match platform::probe(
        host,
        &ProbeContext::new(argv.to_vec()).dry_run(options.dry_run),
    )? {
        Detection::Matched(profile) => profile,
        Detection::Restart(restart) => {
            ui::note(&format!("Restarting in the {} build environment", restart.platform));
            return runner.replace(&restart.invocation);
        }
    };

    ui::info(&format!("Detected platform: {}", profile.platform));

    let executor = Executor::new(host, runner);
    Installer::new(host, &executor).install(&profile, options.dry_run)?;

    if options.dry_run {
        if let Some(dir) = paths::default_install_dir(&profile) {
            println!("{}", dir.display());
        }
        return Ok(0);
    }

    let install_dir = match &options.install {
        InstallTarget::None => None,
        InstallTarget::Dir(dir) => Some(dir.clone()),
        InstallTarget::Default => Some(paths::default_install_dir(&profile).ok_or_else(|| {
            AutobuildError::ConfigError("Cannot determine a default install directory".into())
        })?),
    };

    ui::header("Building");
    BuildDriver::new(host, &executor, &settings.source_dir, &profile.make)
        .build(install_dir.as_deref())?;

    ui::banner("Build succeeded", true);
    Ok(0)
}

/// The running executable followed by the original arguments
fn restart_argv(args: &[String]) -> Vec<String> {
    let program = std::env::current_exe()
        .ok()
        .map(|p| p.display().to_string())
        .or_else(|| args.first().cloned())
        .unwrap_or_else(|| crate::project_identity::BINARY_NAME.to_string());

    std::iter::once(program)
        .chain(args.iter().skip(1).cloned())
        .collect()
}
