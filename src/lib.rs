pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod packages;
pub mod platform;
pub mod project_identity;
pub mod system;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod testing;

use clap::Parser;
use clap::error::ErrorKind;
use error::AutobuildError;
use std::process::exit;

/// Run autobuild CLI entrypoint.
pub fn run_cli() {
    // 1. Signal Handling (children receive the same SIGINT; we only report and leave)
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::warning("Build cancelled by user.");
        exit(130);
    }) {
        ui::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    // 2. Collect arguments (they may have to be quoted for a restart)
    let args: Vec<String> = match std::env::args_os()
        .map(|a| a.into_string())
        .collect::<Result<Vec<String>, _>>()
    {
        Ok(args) => args,
        Err(bad) => {
            let err = AutobuildError::Usage(format!(
                "Argument is not valid UTF-8: {}",
                bad.to_string_lossy()
            ));
            ui::error(&err.to_string());
            exit(err.exit_code());
        }
    };

    // 3. Parse
    let cli = match cli::Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            exit(code);
        }
    };

    // 4. Settings & Run
    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            ui::error(&e.to_string());
            exit(e.exit_code());
        }
    };
    ui::set_quiet(settings.quiet);
    ui::set_verbose(settings.verbose);

    match cli::dispatcher::dispatch(&cli, &settings, &args) {
        Ok(code) => exit(code),
        Err(e) => {
            ui::error(&e.to_string());
            if matches!(e, AutobuildError::BuildFailed(_)) {
                ui::banner("Build failed", false);
            }
            exit(e.exit_code());
        }
    }
}
