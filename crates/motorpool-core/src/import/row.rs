//! Turns raw spreadsheet rows into draft roster records. Per-row problems
//! never abort a batch: invalid drafts are split out by [`split_valid`] so
//! callers can preview everything while persisting only the valid subset.

use crate::domain::driver::DEFAULT_STATUS;
use crate::import::header::normalize_header;
use serde::Serialize;
use std::collections::HashMap;

/// Loosely typed scalar as produced by the tabular file reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Trimmed string form. Integral spreadsheet numbers lose the `.0`
    /// tail so phone and id columns stored as numbers survive import.
    pub fn to_field_string(&self) -> String {
        match self {
            CellValue::Text(value) => value.trim().to_string(),
            CellValue::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            CellValue::Bool(value) => value.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// One spreadsheet row, key/value pairs in original column order.
pub type RawRow = Vec<(String, CellValue)>;

/// A parsed-but-not-yet-validated row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftRecord {
    pub plate: String,
    pub employee_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub telegram_phone: Option<String>,
    pub captain: String,
    pub schedule: Option<String>,
    pub rest_day: Option<String>,
    pub status: String,
}

impl DraftRecord {
    /// Exactly the conjunction of the four non-empty checks.
    pub fn is_valid(&self) -> bool {
        !self.plate.is_empty()
            && !self.employee_id.is_empty()
            && !self.name.is_empty()
            && !self.captain.is_empty()
    }
}

/// Parse every row, preserving input order. Never fails; rows that map to
/// nothing useful come out as empty (and therefore invalid) drafts.
pub fn parse_rows(rows: &[RawRow]) -> Vec<DraftRecord> {
    rows.iter().map(parse_row).collect()
}

/// Partition drafts into (valid, invalid), keeping order within each side.
pub fn split_valid(drafts: Vec<DraftRecord>) -> (Vec<DraftRecord>, Vec<DraftRecord>) {
    drafts.into_iter().partition(DraftRecord::is_valid)
}

fn parse_row(row: &RawRow) -> DraftRecord {
    let mut fields: HashMap<String, String> = HashMap::new();
    // Last write wins when two raw headers collapse onto one canonical key.
    for (raw_key, value) in row {
        fields.insert(normalize_header(raw_key), value.to_field_string());
    }

    let required = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let optional = |key: &str| {
        fields
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
    };

    let status = match fields.get("status") {
        Some(value) if !value.is_empty() => value.clone(),
        _ => DEFAULT_STATUS.to_string(),
    };

    DraftRecord {
        plate: required("plate"),
        employee_id: required("employee_id"),
        name: required("name"),
        phone: optional("phone"),
        telegram_phone: optional("telegram_phone"),
        captain: required("captain"),
        schedule: optional("schedule"),
        rest_day: optional("rest_day"),
        status,
    }
}
