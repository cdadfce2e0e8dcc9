//! Where the roster database lives. Default is the XDG data directory
//! (`$XDG_DATA_HOME/motorpool`, else `~/.local/share/motorpool`), kept
//! owner-only; `--db-path` bypasses all of this and is used verbatim.

use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "motorpool";
const DB_FILENAME: &str = "motorpool.sqlite3";

pub fn data_dir() -> Result<PathBuf> {
    let base = match env::var_os("XDG_DATA_HOME") {
        Some(dir) => {
            let path = PathBuf::from(dir);
            if path.as_os_str().is_empty() {
                return Err(StoreError::InvalidDataPath(path));
            }
            path
        }
        None => dirs::home_dir()
            .ok_or(StoreError::MissingHomeDir)?
            .join(".local")
            .join("share"),
    };
    Ok(base.join(APP_DIR))
}

pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)?;
    restrict_dir_permissions(&dir)?;
    Ok(dir)
}

pub fn db_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(DB_FILENAME))
}

pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join(DB_FILENAME)
}

/// A custom path wins over the default location; an empty one is a user
/// error, not a fallback to the default.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) if path.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(path)),
        Some(path) => Ok(path),
        None => db_path(),
    }
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{db_path_in, resolve_db_path};
    use crate::error::StoreError;
    use std::path::{Path, PathBuf};

    #[test]
    fn custom_db_path_is_used_verbatim() {
        let custom = PathBuf::from("/tmp/fleet/roster.sqlite3");
        let resolved = resolve_db_path(Some(custom.clone())).expect("resolve");
        assert_eq!(resolved, custom);
    }

    #[test]
    fn empty_custom_db_path_is_rejected() {
        let err = resolve_db_path(Some(PathBuf::new())).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDataPath(_)));
    }

    #[test]
    fn db_file_name_is_fixed() {
        assert_eq!(
            db_path_in(Path::new("/var/lib/fleet")),
            Path::new("/var/lib/fleet/motorpool.sqlite3")
        );
    }
}
