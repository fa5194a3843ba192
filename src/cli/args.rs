use crate::utils::paths::{absolutize, same_location};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "autobuild",
    about = "Install native build dependencies and build the sources next to this binary",
    long_about = "Detects the host platform, installs the native build dependencies with the \
                  system package manager, then runs autoreconf, configure and make.",
    override_usage = "autobuild [--help | -n | [-i DIR | -I]]",
    disable_help_flag = true,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    /// Print this help and exit
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Dry run: print the default install directory and exit
    #[arg(short = 'n', conflicts_with_all = ["install_dir", "install_default"])]
    pub dry_run: bool,

    /// Install into the platform's default directory
    #[arg(short = 'I', conflicts_with = "install_dir")]
    pub install_default: bool,

    /// Install into DIR
    #[arg(short = 'i', value_name = "DIR")]
    pub install_dir: Option<PathBuf>,
}

/// Where the built program should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallTarget {
    /// Build only
    None,
    /// Platform default, resolved once the platform is known
    Default,
    Dir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub dry_run: bool,
    pub install: InstallTarget,
}

impl Options {
    /// Resolve flags against the caller's working directory.
    ///
    /// `-i DIR` naming the working directory itself means no install.
    pub fn from_cli(cli: &Cli, cwd: &Path) -> Self {
        let install = if cli.install_default {
            InstallTarget::Default
        } else if let Some(dir) = &cli.install_dir {
            let dir = absolutize(dir, cwd);
            if same_location(&dir, cwd) {
                InstallTarget::None
            } else {
                InstallTarget::Dir(dir)
            }
        } else {
            InstallTarget::None
        };

        Self {
            dry_run: cli.dry_run,
            install,
        }
    }
}
