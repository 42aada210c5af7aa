use crate::api::DEFAULT_ENDPOINT;
use crate::app::DEFAULT_ITEMS_PER_PAGE;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Runtime settings. Keys missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub page_size: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_ITEMS_PER_PAGE,
            log_level: "info".to_string(),
        }
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub page_size: Option<usize>,
    pub log_level: Option<String>,
}

impl Settings {
    /// Resolve settings from defaults, an optional file and CLI overrides.
    ///
    /// An explicit `path` must exist. Without one, the per-user settings
    /// file is read when present.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };

        if let Some(endpoint) = overrides.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(page_size) = overrides.page_size {
            settings.page_size = page_size;
        }
        if let Some(level) = overrides.log_level {
            settings.log_level = level;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "restcountries", "country-explorer")
}

/// `<config dir>/settings.json`, if a home directory can be determined.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join(SETTINGS_FILE))
}

/// Where the TUI writes its log unless told otherwise.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().join("country-explorer.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.page_size, 56);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.log_level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = settings_file(r#"{"page_size": 12}"#);
        let settings = Settings::load(Some(file.path()), Overrides::default()).unwrap();
        assert_eq!(settings.page_size, 12);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = settings_file(r#"{"page_size": 12, "log_level": "warn"}"#);
        let overrides = Overrides {
            endpoint: Some("http://localhost:8080/all".to_string()),
            page_size: Some(30),
            log_level: None,
        };
        let settings = Settings::load(Some(file.path()), overrides).unwrap();
        assert_eq!(settings.page_size, 30);
        assert_eq!(settings.endpoint, "http://localhost:8080/all");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let overrides = Overrides {
            page_size: Some(0),
            ..Overrides::default()
        };
        let file = settings_file("{}");
        let err = Settings::load(Some(file.path()), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let settings = Settings {
            endpoint: "  ".to_string(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = Settings::load(Some(&path), Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let file = settings_file("page_size = 3");
        let err = Settings::load(Some(file.path()), Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
