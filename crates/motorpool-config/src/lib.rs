use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub mod prefs;

pub use prefs::{load_prefs, resolve_prefs_path, save_prefs, ColumnPrefs};

const APP_DIR: &str = "motorpool";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_CHAT_DOMAIN: &str = "t.me";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name recorded as the acting user in upload audit rows.
    pub operator: Option<String>,
    /// Host used for chat deep links (`https://<chat_domain>/<phone>`).
    pub chat_domain: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            operator: None,
            chat_domain: DEFAULT_CHAT_DOMAIN.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid chat_domain value: {0:?}")]
    InvalidChatDomain(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write preferences file {path}: {source}")]
    WritePrefs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    operator: Option<String>,
    chat_domain: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => Ok(config_dir()?.join(CONFIG_FILENAME)),
    }
}

pub(crate) fn config_dir() -> Result<PathBuf> {
    let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfigPath(path));
        }
        path
    } else {
        let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
        home.join(".config")
    };
    Ok(base.join(APP_DIR))
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let defaults = AppConfig::default();
    let chat_domain = match file.chat_domain {
        Some(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() || trimmed.contains('/') {
                return Err(ConfigError::InvalidChatDomain(value));
            }
            trimmed
        }
        None => defaults.chat_domain,
    };

    Ok(Some(AppConfig {
        operator: file
            .operator
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        chat_domain,
    }))
}
