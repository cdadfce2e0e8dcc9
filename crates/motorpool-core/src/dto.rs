use crate::domain::{DriverId, DriverRecord, UploadMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverListItemDto {
    pub id: DriverId,
    pub plate: String,
    pub employee_id: String,
    pub name: String,
    pub captain: String,
    pub phone: Option<String>,
    pub status: String,
}

impl From<&DriverRecord> for DriverListItemDto {
    fn from(record: &DriverRecord) -> Self {
        Self {
            id: record.id,
            plate: record.plate.clone(),
            employee_id: record.employee_id.clone(),
            name: record.name.clone(),
            captain: record.captain.clone(),
            phone: record.phone.clone(),
            status: record.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPreviewDto {
    pub total_rows: usize,
    pub valid: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReportDto {
    pub file_name: String,
    pub mode: UploadMode,
    pub records_applied: usize,
    pub invalid_rows: usize,
}
