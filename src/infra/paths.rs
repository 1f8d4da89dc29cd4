// src/infra/paths.rs — Config path resolution
//
// TWELVE_ANGRY_LLMS_HOME overrides everything. Otherwise the platform config
// directory is used (~/.config/twelve-angry-llms on Linux).

use directories::ProjectDirs;
use std::path::PathBuf;

pub const HOME_ENV: &str = "TWELVE_ANGRY_LLMS_HOME";

/// Returns the TWELVE_ANGRY_LLMS_HOME override, if set.
fn home_override() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV).map(PathBuf::from)
}

/// Configuration directory. Falls back to the working directory when the
/// platform has no notion of a home directory.
pub fn config_dir() -> PathBuf {
    if let Some(home) = home_override() {
        return home;
    }
    ProjectDirs::from("", "", "twelve-angry-llms")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
