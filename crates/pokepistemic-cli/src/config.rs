use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "pokepistemic.yaml";
const DEFAULT_SESSION_ID: &str = "battle-1";
const DEFAULT_LIST_WORLDS_AT_MOST: usize = 4;
const SESSION_ID_ALLOWED: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root session configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: default_session_id(),
            catalog: CatalogConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SessionConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Loads `path` when given; otherwise the default file if present, else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_path(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_session_id(&self.session_id)?;
        self.catalog.validate()?;
        self.display.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }

    /// Resolve `{session_id}` placeholders in the log directory.
    pub fn resolved_log_dir(&self) -> PathBuf {
        resolve_template(&self.session_id, &self.logging.log_dir)
    }
}

/// Where candidate sets come from. `None` selects the built-in fallback table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = self.path.as_ref() {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "catalog.path".to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_list_worlds_at_most")]
    pub list_worlds_at_most: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            list_worlds_at_most: DEFAULT_LIST_WORLDS_AT_MOST,
        }
    }
}

impl DisplayConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.list_worlds_at_most == 0 {
            return Err(ValidationError::InvalidField {
                field: "display.list_worlds_at_most".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.log_dir.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.log_dir".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

fn default_list_worlds_at_most() -> usize {
    DEFAULT_LIST_WORLDS_AT_MOST
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs/{session_id}".to_string()
}

fn validate_session_id(session_id: &str) -> Result<(), ValidationError> {
    if session_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "session_id".to_string(),
            message: "session_id must not be empty".to_string(),
        });
    }

    if !session_id.chars().all(|c| SESSION_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "session_id".to_string(),
            message: "session_id may only contain alphanumeric characters, '.', '_' or '-'"
                .to_string(),
        });
    }

    Ok(())
}

fn resolve_template(session_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{session_id}", session_id))
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
