//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const DISPLAY_NAME: &str = "Autobuild";
pub const BINARY_NAME: &str = "autobuild";
pub const ENV_PREFIX: &str = "AUTOBUILD";

/// Set inside the `nix-shell` we restart into on NixOS.
pub const NIX_SHELL_SENTINEL: &str = "AUTOBUILD_NIX_SHELL";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}
