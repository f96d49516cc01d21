//! Where churnpal keeps its files: one `.churnpal` folder holding
//! `config.toml`, `logs/` and the default `artifacts/` folder.
//!
//! The folder sits under the OS config directory unless `CHURNPAL_CONFIG_HOME`
//! names another base.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the base directory.
pub const APP_DIR_NAME: &str = ".churnpal";
/// Environment variable that replaces the OS config directory as the base.
pub const CONFIG_HOME_ENV: &str = "CHURNPAL_CONFIG_HOME";

/// Failure to locate or prepare the application folder.
#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory found; set {CONFIG_HOME_ENV} to choose one")]
    NoBaseDir,
    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.churnpal` folder and its fixed children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Resolve the folder from `CHURNPAL_CONFIG_HOME` or the OS config dir.
    pub fn locate() -> Result<Self, AppDirError> {
        let base = match std::env::var_os(CONFIG_HOME_ENV) {
            Some(base) if !base.is_empty() => PathBuf::from(base),
            _ => BaseDirs::new()
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or(AppDirError::NoBaseDir)?,
        };
        Ok(Self::under(base))
    }

    /// Use `base/.churnpal` without consulting the environment.
    pub fn under(base: impl AsRef<Path>) -> Self {
        Self {
            root: base.as_ref().join(APP_DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `config.toml`, creating the root so the file can be written.
    pub fn config_file(&self, name: &str) -> Result<PathBuf, AppDirError> {
        Ok(ensure_dir(&self.root)?.join(name))
    }

    /// The logs folder, created on demand.
    pub fn logs(&self) -> Result<PathBuf, AppDirError> {
        ensure_dir(&self.root.join("logs"))
    }

    /// Default artifact folder. Not created: a missing folder is reported by
    /// the loader with the file it was looking for.
    pub fn artifacts(&self) -> PathBuf {
        self.root.join("artifacts")
    }
}

fn ensure_dir(path: &Path) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
