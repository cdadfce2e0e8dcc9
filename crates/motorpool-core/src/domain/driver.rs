use crate::domain::ids::DriverId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Status assigned to rows that arrive without one.
pub const DEFAULT_STATUS: &str = "active";

/// A roster entry. `plate` is the natural key and must be unique across the
/// fleet; the store enforces that. `status` is an arbitrary label, the
/// well-known values (`active`/`inactive`/`suspended`) only matter for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub id: DriverId,
    pub plate: String,
    pub employee_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub telegram_phone: Option<String>,
    pub captain: String,
    pub schedule: Option<String>,
    pub rest_day: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DriverRecord {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.plate.trim().is_empty() {
            return Err(CoreError::EmptyPlate);
        }
        if self.employee_id.trim().is_empty() {
            return Err(CoreError::EmptyEmployeeId);
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }
        if self.captain.trim().is_empty() {
            return Err(CoreError::EmptyCaptain);
        }
        Ok(())
    }
}
