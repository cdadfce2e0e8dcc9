//! Projects a driver list through a selectable column set into tabular rows,
//! and extracts contact cards for the vCard export. Each column carries its
//! own label and formatting rule so every tabular surface (CSV, XLSX, print
//! HTML) shares one extraction path.

use crate::domain::{phone, DriverRecord};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Contact-card exports are chunked so downstream contact-import apps never
/// see an unbounded artifact.
pub const CONTACT_BATCH_SIZE: usize = 100;

/// Display label used when a driver's captain is the placeholder "0".
pub const UNASSIGNED_CAPTAIN_LABEL: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportColumn {
    Plate,
    EmployeeId,
    Name,
    Phone,
    TelegramPhone,
    Captain,
    Schedule,
    RestDay,
    Status,
}

/// Fixed superset of selectable columns, in default order.
pub const ALL_COLUMNS: &[ExportColumn] = &[
    ExportColumn::Plate,
    ExportColumn::EmployeeId,
    ExportColumn::Name,
    ExportColumn::Phone,
    ExportColumn::TelegramPhone,
    ExportColumn::Captain,
    ExportColumn::Schedule,
    ExportColumn::RestDay,
    ExportColumn::Status,
];

impl ExportColumn {
    pub fn key(&self) -> &'static str {
        match self {
            ExportColumn::Plate => "plate",
            ExportColumn::EmployeeId => "employee_id",
            ExportColumn::Name => "name",
            ExportColumn::Phone => "phone",
            ExportColumn::TelegramPhone => "telegram_phone",
            ExportColumn::Captain => "captain",
            ExportColumn::Schedule => "schedule",
            ExportColumn::RestDay => "rest_day",
            ExportColumn::Status => "status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportColumn::Plate => "Plate",
            ExportColumn::EmployeeId => "Employee ID",
            ExportColumn::Name => "Name",
            ExportColumn::Phone => "Phone",
            ExportColumn::TelegramPhone => "Telegram",
            ExportColumn::Captain => "Captain",
            ExportColumn::Schedule => "Schedule",
            ExportColumn::RestDay => "Rest Day",
            ExportColumn::Status => "Status",
        }
    }

    pub fn extract(&self, record: &DriverRecord) -> String {
        match self {
            ExportColumn::Plate => record.plate.clone(),
            ExportColumn::EmployeeId => record.employee_id.clone(),
            ExportColumn::Name => record.name.clone(),
            ExportColumn::Phone => record
                .phone
                .as_deref()
                .and_then(phone::display)
                .unwrap_or_default(),
            ExportColumn::TelegramPhone => record
                .telegram_phone
                .as_deref()
                .and_then(phone::display)
                .unwrap_or_default(),
            ExportColumn::Captain => {
                if record.captain == "0" {
                    UNASSIGNED_CAPTAIN_LABEL.to_string()
                } else {
                    record.captain.clone()
                }
            }
            ExportColumn::Schedule => record.schedule.clone().unwrap_or_default(),
            ExportColumn::RestDay => record.rest_day.clone().unwrap_or_default(),
            ExportColumn::Status => record.status.clone(),
        }
    }
}

impl FromStr for ExportColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ALL_COLUMNS
            .iter()
            .find(|column| column.key() == key)
            .copied()
            .ok_or(CoreError::UnknownColumn(key))
    }
}

pub fn header_labels(columns: &[ExportColumn]) -> Vec<String> {
    columns.iter().map(|column| column.label().to_string()).collect()
}

/// One output row per record, formatted per column. An empty selection is a
/// user-facing validation error, never a silent empty artifact.
pub fn project(
    records: &[DriverRecord],
    columns: &[ExportColumn],
) -> Result<Vec<Vec<String>>, CoreError> {
    if columns.is_empty() {
        return Err(CoreError::NoColumnsSelected);
    }
    Ok(records
        .iter()
        .map(|record| columns.iter().map(|column| column.extract(record)).collect())
        .collect())
}

/// Contact-card payload: canonical phones, second dropped when it duplicates
/// the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub name: String,
    pub phone: String,
    pub telegram_phone: Option<String>,
}

/// One card per record that has at least one usable phone.
pub fn contact_cards(records: &[DriverRecord]) -> Vec<ContactCard> {
    records
        .iter()
        .filter_map(|record| {
            let primary = record.phone.as_deref().and_then(phone::normalize);
            let telegram = record.telegram_phone.as_deref().and_then(phone::normalize);
            let (card_phone, card_telegram) = match (primary, telegram) {
                (Some(primary), Some(telegram)) => {
                    let telegram = if telegram == primary { None } else { Some(telegram) };
                    (primary, telegram)
                }
                (Some(primary), None) => (primary, None),
                (None, Some(telegram)) => (telegram, None),
                (None, None) => return None,
            };
            Some(ContactCard {
                name: record.name.clone(),
                phone: card_phone,
                telegram_phone: card_telegram,
            })
        })
        .collect()
}

/// Chunk cards at [`CONTACT_BATCH_SIZE`] per artifact.
pub fn card_batches(cards: Vec<ContactCard>) -> Vec<Vec<ContactCard>> {
    cards
        .chunks(CONTACT_BATCH_SIZE)
        .map(<[ContactCard]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DriverId;

    fn driver(name: &str, phone: Option<&str>, telegram: Option<&str>) -> DriverRecord {
        DriverRecord {
            id: DriverId::new(),
            plate: "ABC 123".to_string(),
            employee_id: "E-1".to_string(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            telegram_phone: telegram.map(str::to_string),
            captain: "0".to_string(),
            schedule: None,
            rest_day: Some("Sunday".to_string()),
            status: "active".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn project_formats_per_column() {
        let records = vec![driver("Juan", Some("09171234567"), None)];
        let columns = [
            ExportColumn::Name,
            ExportColumn::Phone,
            ExportColumn::Captain,
            ExportColumn::Schedule,
        ];
        let rows = project(&records, &columns).unwrap();
        assert_eq!(
            rows,
            vec![vec![
                "Juan".to_string(),
                "+63 917 123 4567".to_string(),
                "Unassigned".to_string(),
                String::new(),
            ]]
        );
    }

    #[test]
    fn project_rejects_empty_selection() {
        let records = vec![driver("Juan", None, None)];
        assert_eq!(
            project(&records, &[]).unwrap_err(),
            CoreError::NoColumnsSelected
        );
    }

    #[test]
    fn column_keys_round_trip() {
        for column in ALL_COLUMNS {
            assert_eq!(&column.key().parse::<ExportColumn>().unwrap(), column);
        }
        assert!("middle_name".parse::<ExportColumn>().is_err());
    }

    #[test]
    fn contact_cards_skip_phoneless_and_dedupe() {
        let records = vec![
            driver("Has Both", Some("09171234567"), Some("09998887777")),
            driver("Duplicate", Some("09171234567"), Some("+639171234567")),
            driver("Telegram Only", None, Some("09998887777")),
            driver("No Phone", None, None),
        ];
        let cards = contact_cards(&records);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].telegram_phone.as_deref(), Some("+639998887777"));
        assert!(cards[1].telegram_phone.is_none());
        assert_eq!(cards[2].phone, "+639998887777");
    }

    #[test]
    fn batches_are_bounded_at_one_hundred() {
        let records: Vec<DriverRecord> = (0..250)
            .map(|i| driver(&format!("Driver {i}"), Some("09171234567"), None))
            .collect();
        let batches = card_batches(contact_cards(&records));
        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
    }
}
