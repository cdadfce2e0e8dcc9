use crate::error::{Result, StoreError};
use motorpool_core::domain::{DriverId, DriverRecord, DEFAULT_STATUS};
use rusqlite::{params, Connection};
use std::str::FromStr;

const DRIVER_COLUMNS: &str = "id, plate, employee_id, name, phone, telegram_phone, captain, schedule, rest_day, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct DriverNew {
    pub plate: String,
    pub employee_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub telegram_phone: Option<String>,
    pub captain: String,
    pub schedule: Option<String>,
    pub rest_day: Option<String>,
    pub status: Option<String>,
}

/// Field-wise update. Outer `None` leaves a field alone; `Some(None)` clears
/// an optional field.
#[derive(Debug, Clone, Default)]
pub struct DriverUpdate {
    pub plate: Option<String>,
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub telegram_phone: Option<Option<String>>,
    pub captain: Option<String>,
    pub schedule: Option<Option<String>>,
    pub rest_day: Option<Option<String>>,
    pub status: Option<String>,
}

pub struct DriversRepo<'a> {
    conn: &'a Connection,
}

impl<'a> DriversRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: DriverNew) -> Result<DriverRecord> {
        let record = DriverRecord {
            id: DriverId::new(),
            plate: input.plate.trim().to_string(),
            employee_id: input.employee_id.trim().to_string(),
            name: input.name.trim().to_string(),
            phone: normalize_optional(input.phone),
            telegram_phone: normalize_optional(input.telegram_phone),
            captain: input.captain.trim().to_string(),
            schedule: normalize_optional(input.schedule),
            rest_day: normalize_optional(input.rest_day),
            status: input
                .status
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            created_at: now_utc,
            updated_at: now_utc,
        };

        record.validate()?;

        self.conn
            .execute(
                "INSERT INTO drivers (id, plate, employee_id, name, phone, telegram_phone, captain, schedule, rest_day, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
                params![
                    record.id.to_string(),
                    record.plate,
                    record.employee_id,
                    record.name,
                    record.phone,
                    record.telegram_phone,
                    record.captain,
                    record.schedule,
                    record.rest_day,
                    record.status,
                    record.created_at,
                    record.updated_at,
                ],
            )
            .map_err(|err| map_plate_conflict(err, &record.plate))?;

        Ok(record)
    }

    pub fn get(&self, id: DriverId) -> Result<Option<DriverRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = ?1;"
        ))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(driver_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_by_plate(&self, plate: &str) -> Result<Option<DriverRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE plate = ?1;"
        ))?;
        let mut rows = stmt.query([plate.trim()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(driver_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Overwrites selected fields; `id` and `created_at` never change and
    /// `updated_at` always refreshes.
    pub fn update(&self, now_utc: i64, id: DriverId, update: DriverUpdate) -> Result<DriverRecord> {
        let mut record = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(value) = update.plate {
            record.plate = value.trim().to_string();
        }
        if let Some(value) = update.employee_id {
            record.employee_id = value.trim().to_string();
        }
        if let Some(value) = update.name {
            record.name = value.trim().to_string();
        }
        if let Some(value) = update.phone {
            record.phone = normalize_optional(value);
        }
        if let Some(value) = update.telegram_phone {
            record.telegram_phone = normalize_optional(value);
        }
        if let Some(value) = update.captain {
            record.captain = value.trim().to_string();
        }
        if let Some(value) = update.schedule {
            record.schedule = normalize_optional(value);
        }
        if let Some(value) = update.rest_day {
            record.rest_day = normalize_optional(value);
        }
        if let Some(value) = update.status {
            let trimmed = value.trim().to_string();
            record.status = if trimmed.is_empty() {
                DEFAULT_STATUS.to_string()
            } else {
                trimmed
            };
        }

        record.updated_at = now_utc;
        record.validate()?;

        self.conn
            .execute(
                "UPDATE drivers
                 SET plate = ?2, employee_id = ?3, name = ?4, phone = ?5, telegram_phone = ?6,
                     captain = ?7, schedule = ?8, rest_day = ?9, status = ?10, updated_at = ?11
                 WHERE id = ?1;",
                params![
                    record.id.to_string(),
                    record.plate,
                    record.employee_id,
                    record.name,
                    record.phone,
                    record.telegram_phone,
                    record.captain,
                    record.schedule,
                    record.rest_day,
                    record.status,
                    record.updated_at,
                ],
            )
            .map_err(|err| map_plate_conflict(err, &record.plate))?;

        Ok(record)
    }

    pub fn delete(&self, id: DriverId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM drivers WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn delete_all(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM drivers;", [])?;
        Ok(deleted)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM drivers;", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Roster in display order: captain, then name, case-insensitive.
    pub fn list_all(&self) -> Result<Vec<DriverRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers
             ORDER BY captain COLLATE NOCASE ASC, name COLLATE NOCASE ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut drivers = Vec::new();
        while let Some(row) = rows.next()? {
            drivers.push(driver_from_row(row)?);
        }
        Ok(drivers)
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn map_plate_conflict(err: rusqlite::Error, plate: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation
            && message.contains("drivers.plate")
        {
            return StoreError::DuplicatePlate(plate.to_string());
        }
    }
    StoreError::Sql(err)
}

fn driver_from_row(row: &rusqlite::Row<'_>) -> Result<DriverRecord> {
    let id_str: String = row.get(0)?;
    let id = DriverId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(DriverRecord {
        id,
        plate: row.get(1)?,
        employee_id: row.get(2)?,
        name: row.get(3)?,
        phone: row.get(4)?,
        telegram_phone: row.get(5)?,
        captain: row.get(6)?,
        schedule: row.get(7)?,
        rest_day: row.get(8)?,
        status: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
