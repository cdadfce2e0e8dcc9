use crate::error::{Result, StoreError};
use motorpool_core::domain::{UploadId, UploadMode, UploadRecord};
use rusqlite::{params, Connection};
use std::str::FromStr;

/// Append-only audit trail; rows are never mutated or deleted here.
pub struct UploadsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UploadsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn append(
        &self,
        now_utc: i64,
        actor: Option<&str>,
        file_name: &str,
        mode: UploadMode,
        records_count: i64,
    ) -> Result<UploadRecord> {
        let record = UploadRecord {
            id: UploadId::new(),
            actor: actor
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            file_name: file_name.to_string(),
            mode,
            records_count,
            created_at: now_utc,
        };

        self.conn.execute(
            "INSERT INTO uploads (id, actor, file_name, mode, records_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.id.to_string(),
                record.actor,
                record.file_name,
                record.mode.as_str(),
                record.records_count,
                record.created_at,
            ],
        )?;

        Ok(record)
    }

    pub fn list_all(&self) -> Result<Vec<UploadRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, actor, file_name, mode, records_count, created_at
             FROM uploads ORDER BY created_at DESC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut uploads = Vec::new();
        while let Some(row) = rows.next()? {
            uploads.push(upload_from_row(row)?);
        }
        Ok(uploads)
    }
}

fn upload_from_row(row: &rusqlite::Row<'_>) -> Result<UploadRecord> {
    let id_str: String = row.get(0)?;
    let id = UploadId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let mode_str: String = row.get(3)?;
    let mode = UploadMode::from_str(&mode_str)
        .map_err(|_| StoreError::InvalidUploadMode(mode_str.clone()))?;
    Ok(UploadRecord {
        id,
        actor: row.get(1)?,
        file_name: row.get(2)?,
        mode,
        records_count: row.get(4)?,
        created_at: row.get(5)?,
    })
}
