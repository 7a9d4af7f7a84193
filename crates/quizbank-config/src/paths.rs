//! Application paths management.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Name of the config file, both in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "quizbank.toml";

/// Locations where a config file may live.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    /// `quizbank.toml` in the current working directory.
    pub local_config_file: PathBuf,
}

impl AppPaths {
    /// Create paths using platform-specific directories.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("com", "quizbank", "quizbank")?;
        let config_dir = proj_dirs.config_dir().to_path_buf();

        Some(Self {
            config_file: config_dir.join(CONFIG_FILE_NAME),
            local_config_file: PathBuf::from(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Create the config directory.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)
    }

    /// The config file that should be loaded: the local one wins over the user one.
    pub fn active_config_file(&self) -> Option<&Path> {
        [&self.local_config_file, &self.config_file]
            .into_iter()
            .find(|p| p.exists())
            .map(|p| p.as_path())
    }
}
