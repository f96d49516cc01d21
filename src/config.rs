//! TOML configuration naming the artifact files.
//!
//! Config keys (TOML): `[artifacts]` with `dir`, `selector`, `scaler`,
//! `classifier`. A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{AppDirError, AppDirs};
use crate::artifacts::ArtifactPaths;

/// Default filename used to store the configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that may occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The application folder could not be located or created.
    #[error(transparent)]
    AppDir(#[from] AppDirError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactSettings,
    /// Directory the config was read from; relative paths resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Where the serialized selector, scaler and classifier live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSettings {
    /// Folder holding the three files; defaults to `<app root>/artifacts`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_selector_file")]
    pub selector: PathBuf,
    #[serde(default = "default_scaler_file")]
    pub scaler: PathBuf,
    #[serde(default = "default_classifier_file")]
    pub classifier: PathBuf,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            dir: None,
            selector: default_selector_file(),
            scaler: default_scaler_file(),
            classifier: default_classifier_file(),
        }
    }
}

fn default_selector_file() -> PathBuf {
    PathBuf::from("rfe_selector.json")
}

fn default_scaler_file() -> PathBuf {
    PathBuf::from("scaler.json")
}

fn default_classifier_file() -> PathBuf {
    PathBuf::from("classifier.json")
}

/// Resolve the default configuration file path, ensuring its folder exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(AppDirs::locate()?.config_file(CONFIG_FILE_NAME)?)
}

/// Load the default configuration file, returning defaults if it is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from an explicit path, returning defaults if missing.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = if path.exists() {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<AppConfig>(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        tracing::debug!("No config at {}; using defaults", path.display());
        AppConfig::default()
    };
    config.base_dir = path.parent().map(Path::to_path_buf);
    Ok(config)
}

impl AppConfig {
    /// Resolve artifact file paths, preferring `dir_override` over the config.
    pub fn artifact_paths(&self, dir_override: Option<&Path>) -> Result<ArtifactPaths, ConfigError> {
        let dir = match (dir_override, &self.artifacts.dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) => self.resolve(dir),
            (None, None) => AppDirs::locate()?.artifacts(),
        };
        let settings = &self.artifacts;
        Ok(ArtifactPaths {
            selector: dir.join(&settings.selector),
            scaler: dir.join(&settings.scaler),
            classifier: dir.join(&settings.classifier),
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.artifacts, ArtifactSettings::default());
        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn relative_dir_resolves_against_config_folder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[artifacts]\ndir = \"models\"\nclassifier = \"xgb_tuned.json\"\n",
        )
        .unwrap();
        let config = load_from(&path).unwrap();
        let paths = config.artifact_paths(None).unwrap();
        assert_eq!(paths.selector, dir.path().join("models/rfe_selector.json"));
        assert_eq!(paths.scaler, dir.path().join("models/scaler.json"));
        assert_eq!(paths.classifier, dir.path().join("models/xgb_tuned.json"));
    }

    #[test]
    fn override_dir_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[artifacts]\ndir = \"/somewhere/else\"\n").unwrap();
        let config = load_from(&path).unwrap();
        let paths = config.artifact_paths(Some(dir.path())).unwrap();
        assert_eq!(paths.scaler, dir.path().join("scaler.json"));
    }

    #[test]
    fn malformed_toml_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[artifacts\n").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn missing_app_folder_keeps_its_hint() {
        let err = ConfigError::from(AppDirError::NoBaseDir);
        assert!(matches!(err, ConfigError::AppDir(AppDirError::NoBaseDir)));
        assert!(err.to_string().contains(crate::app_dirs::CONFIG_HOME_ENV));
    }
}
