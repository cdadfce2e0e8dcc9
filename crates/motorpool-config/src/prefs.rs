//! Persisted UI preferences: which columns exports include and the order
//! they appear in. Read on startup, written on change; an absent or corrupt
//! file falls back to the full default column set rather than erroring.

use crate::{config_dir, ConfigError, Result};
use motorpool_core::export::ALL_COLUMNS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PREFS_FILENAME: &str = "prefs.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnPrefs {
    pub export_columns: Vec<String>,
    pub column_order: Vec<String>,
}

impl Default for ColumnPrefs {
    fn default() -> Self {
        let keys: Vec<String> = ALL_COLUMNS
            .iter()
            .map(|column| column.key().to_string())
            .collect();
        Self {
            export_columns: keys.clone(),
            column_order: keys,
        }
    }
}

/// Preferences live next to the config file: beside a custom config path
/// when one is given, under the default config directory otherwise.
pub fn resolve_prefs_path(custom_config: Option<&Path>) -> Result<PathBuf> {
    match custom_config {
        Some(path) => {
            let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
            match parent {
                Some(dir) => Ok(dir.join(PREFS_FILENAME)),
                None => Ok(PathBuf::from(PREFS_FILENAME)),
            }
        }
        None => Ok(config_dir()?.join(PREFS_FILENAME)),
    }
}

/// Total: never fails, the defaults are the documented fallback.
pub fn load_prefs(path: &Path) -> ColumnPrefs {
    let Ok(raw) = fs::read_to_string(path) else {
        return ColumnPrefs::default();
    };
    match toml::from_str::<ColumnPrefs>(&raw) {
        Ok(prefs) if !prefs.export_columns.is_empty() => prefs,
        _ => ColumnPrefs::default(),
    }
}

pub fn save_prefs(path: &Path, prefs: &ColumnPrefs) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WritePrefs {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    let raw = toml::to_string_pretty(prefs).map_err(|source| ConfigError::WritePrefs {
        path: path.to_path_buf(),
        source: std::io::Error::other(source),
    })?;
    fs::write(path, raw).map_err(|source| ConfigError::WritePrefs {
        path: path.to_path_buf(),
        source,
    })
}
