mod installer;

pub use installer::{InstallOutcome, Installer};
