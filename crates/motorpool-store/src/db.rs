//! Connection setup for the roster database. The schema is two flat
//! tables with no foreign keys, so no referential pragmas are needed;
//! tuning here covers journaling and contention between concurrent CLI
//! invocations.

use crate::error::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

const BUSY_TIMEOUT_MS: i64 = 2000;

pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    // SQLite materializes a fresh database file lazily; the WAL pragma
    // in `tune` forces the header write, so tighten permissions after.
    tune(&conn)?;
    tighten_file_mode(path)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    tune(&conn)?;
    Ok(conn)
}

/// WAL keeps a `list` readable while an import writes; the busy timeout
/// bounds waiting on a second invocation's short write statements.
fn tune(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
    Ok(())
}

// The roster holds driver phone numbers; the database file stays
// owner-only.
#[cfg(unix)]
fn tighten_file_mode(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn tighten_file_mode(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::open;
    use tempfile::TempDir;

    #[test]
    fn file_backed_connection_journals_in_wal() {
        let dir = TempDir::new().expect("temp dir");
        let conn = open(&dir.path().join("roster.sqlite3")).expect("open");
        let mode: String = conn
            .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .expect("journal mode");
        assert_eq!(mode.to_ascii_lowercase(), "wal");
    }

    #[test]
    fn no_referential_enforcement_is_configured() {
        let dir = TempDir::new().expect("temp dir");
        let conn = open(&dir.path().join("roster.sqlite3")).expect("open");
        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .expect("foreign_keys");
        assert_eq!(foreign_keys, 0);
    }

    #[cfg(unix)]
    #[test]
    fn database_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("roster.sqlite3");
        let _conn = open(&path).expect("open");
        let mode = std::fs::metadata(&path)
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
