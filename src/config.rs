//! Persisted user settings.
//!
//! Lives in `settings.json` in the OS config directory. A missing file means
//! defaults; `BUILDPLAN_BACKEND` overrides the stored backend choice.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BACKEND_ENV: &str = "BUILDPLAN_BACKEND";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unknown store backend '{0}', expected 'json' or 'memory'")]
    UnknownBackend(String),
}

/// Where task records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// A JSON document on local disk.
    #[default]
    Json,
    /// Process memory only, seeded with demo data.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" | "file" | "local" => Ok(StoreBackend::Json),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: StoreBackend,
    /// Schedule file for the JSON backend; the data directory when unset.
    pub data_file: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `info` or `buildplan=debug`.
    pub log_filter: String,
    /// Project shown on the last run.
    pub last_project: Option<Uuid>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            data_file: None,
            log_filter: "info".into(),
            last_project: None,
        }
    }
}

impl Settings {
    /// `settings.json` in the per-user config directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "BuildPlan")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(write_err)
    }

    /// Apply an environment override of the backend, if present.
    pub fn with_env_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value {
            self.backend = value.parse()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("buildplan-settings-{}", Uuid::new_v4()))
            .join("settings.json")
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load_from(&scratch_path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.backend, StoreBackend::Json);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "backend": "memory" }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.backend, StoreBackend::Memory);
        assert_eq!(settings.log_filter, "info");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "backend = memory").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Parse { .. })));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn save_then_load() {
        let path = scratch_path();
        let settings = Settings {
            backend: StoreBackend::Memory,
            data_file: Some(PathBuf::from("/tmp/site.json")),
            log_filter: "buildplan=debug".into(),
            last_project: Some(Uuid::new_v4()),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn unencodable_settings_are_a_serialize_error() {
        use std::os::unix::ffi::OsStringExt;

        let path = scratch_path();
        let settings = Settings {
            data_file: Some(PathBuf::from(std::ffi::OsString::from_vec(vec![0xff, 0xfe]))),
            ..Settings::default()
        };
        assert!(matches!(
            settings.save_to(&path),
            Err(ConfigError::Serialize { .. })
        ));
        assert!(!path.exists());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn env_override_selects_backend() {
        let settings = Settings::default().with_env_override(Some("Memory")).unwrap();
        assert_eq!(settings.backend, StoreBackend::Memory);

        let unchanged = Settings::default().with_env_override(None).unwrap();
        assert_eq!(unchanged.backend, StoreBackend::Json);

        assert!(matches!(
            Settings::default().with_env_override(Some("firestore")),
            Err(ConfigError::UnknownBackend(name)) if name == "firestore"
        ));
    }
}
