//! Pure, order-preserving pipeline that narrows and orders the in-memory
//! roster for display. Stages run field-filters, then free-text search,
//! then an optional stable sort; the input slice is never mutated and the
//! result is a fresh collection, so this is safe to recompute on every
//! state change.

use crate::domain::DriverRecord;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

/// Independent per-field predicates plus one free-text query. `None` means
/// "no constraint"; concrete values must match exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub captain: Option<String>,
    pub schedule: Option<String>,
    pub rest_day: Option<String>,
    pub status: Option<String>,
    pub search: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
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

impl SortField {
    pub fn as_key(&self) -> &'static str {
        match self {
            SortField::Plate => "plate",
            SortField::EmployeeId => "employee_id",
            SortField::Name => "name",
            SortField::Phone => "phone",
            SortField::TelegramPhone => "telegram_phone",
            SortField::Captain => "captain",
            SortField::Schedule => "schedule",
            SortField::RestDay => "rest_day",
            SortField::Status => "status",
        }
    }

    fn value_of<'a>(&self, record: &'a DriverRecord) -> &'a str {
        match self {
            SortField::Plate => &record.plate,
            SortField::EmployeeId => &record.employee_id,
            SortField::Name => &record.name,
            SortField::Phone => record.phone.as_deref().unwrap_or(""),
            SortField::TelegramPhone => record.telegram_phone.as_deref().unwrap_or(""),
            SortField::Captain => &record.captain,
            SortField::Schedule => record.schedule.as_deref().unwrap_or(""),
            SortField::RestDay => record.rest_day.as_deref().unwrap_or(""),
            SortField::Status => &record.status,
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plate" => Ok(SortField::Plate),
            "employee_id" => Ok(SortField::EmployeeId),
            "name" => Ok(SortField::Name),
            "phone" => Ok(SortField::Phone),
            "telegram_phone" => Ok(SortField::TelegramPhone),
            "captain" => Ok(SortField::Captain),
            "schedule" => Ok(SortField::Schedule),
            "rest_day" => Ok(SortField::RestDay),
            "status" => Ok(SortField::Status),
            other => Err(CoreError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Three-state column toggle: unsorted -> ascending -> descending ->
/// unsorted. Activating a different column starts over at ascending.
pub fn cycle_sort(current: Option<SortSpec>, field: SortField) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.field == field => match spec.direction {
            SortDirection::Ascending => Some(SortSpec {
                field,
                direction: SortDirection::Descending,
            }),
            SortDirection::Descending => None,
        },
        _ => Some(SortSpec {
            field,
            direction: SortDirection::Ascending,
        }),
    }
}

/// Filter -> search -> sort. With no sort the input order (store order:
/// captain then name, ascending) survives untouched.
pub fn view(
    all: &[DriverRecord],
    filters: &FilterState,
    sort: Option<SortSpec>,
) -> Vec<DriverRecord> {
    let mut rows: Vec<DriverRecord> = all
        .iter()
        .filter(|record| matches_filters(record, filters))
        .cloned()
        .collect();

    let query = filters.search.trim().to_lowercase();
    if !query.is_empty() {
        rows.retain(|record| matches_search(record, &query));
    }

    if let Some(spec) = sort {
        // sort_by is stable, so ties keep their input order in both
        // directions.
        rows.sort_by(|a, b| {
            let ordering = compare_values(spec.field.value_of(a), spec.field.value_of(b));
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    rows
}

fn matches_filters(record: &DriverRecord, filters: &FilterState) -> bool {
    if let Some(captain) = &filters.captain {
        if record.captain != *captain {
            return false;
        }
    }
    if let Some(schedule) = &filters.schedule {
        if record.schedule.as_deref().unwrap_or("") != schedule {
            return false;
        }
    }
    if let Some(rest_day) = &filters.rest_day {
        if record.rest_day.as_deref().unwrap_or("") != rest_day {
            return false;
        }
    }
    if let Some(status) = &filters.status {
        if record.status != *status {
            return false;
        }
    }
    true
}

fn matches_search(record: &DriverRecord, query: &str) -> bool {
    let haystacks = [
        record.plate.as_str(),
        record.employee_id.as_str(),
        record.name.as_str(),
        record.phone.as_deref().unwrap_or(""),
        record.telegram_phone.as_deref().unwrap_or(""),
        record.captain.as_str(),
        record.schedule.as_deref().unwrap_or(""),
        record.rest_day.as_deref().unwrap_or(""),
        record.status.as_str(),
    ];
    haystacks
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// Case-insensitive comparison that orders embedded digit runs numerically,
/// so "CAB-9" sorts before "CAB-10".
pub fn compare_values(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let left_run = take_digits(&mut left);
                    let right_run = take_digits(&mut right);
                    let ordering = compare_digit_runs(&left_run, &right_run);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                } else {
                    if x != y {
                        return x.cmp(&y);
                    }
                    left.next();
                    right.next();
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        run.push(*ch);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_stripped = a.trim_start_matches('0');
    let b_stripped = b.trim_start_matches('0');
    match a_stripped.len().cmp(&b_stripped.len()) {
        // Same magnitude: digits decide, then leading zeros for a total order.
        Ordering::Equal => a_stripped.cmp(b_stripped).then(a.len().cmp(&b.len())),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DriverId, DriverRecord};
    use std::collections::HashSet;

    fn driver(plate: &str, name: &str, captain: &str, status: &str) -> DriverRecord {
        DriverRecord {
            id: DriverId::new(),
            plate: plate.to_string(),
            employee_id: format!("E-{plate}"),
            name: name.to_string(),
            phone: Some("09171234567".to_string()),
            telegram_phone: None,
            captain: captain.to_string(),
            schedule: Some("day".to_string()),
            rest_day: Some("Sunday".to_string()),
            status: status.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn roster() -> Vec<DriverRecord> {
        vec![
            driver("ABC1", "Jan", "X", "active"),
            driver("ABC2", "Ann", "Y", "inactive"),
            driver("ABC10", "Bob", "X", "active"),
        ]
    }

    #[test]
    fn field_filters_match_exactly() {
        let all = roster();
        let filters = FilterState {
            status: Some("active".to_string()),
            ..Default::default()
        };
        let rows = view(&all, &filters, None);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == "active"));

        let filters = FilterState {
            status: Some("Active".to_string()),
            ..Default::default()
        };
        assert!(view(&all, &filters, None).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring_over_all_fields() {
        let all = roster();
        let filters = FilterState {
            search: "aNn".to_string(),
            ..Default::default()
        };
        let rows = view(&all, &filters, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ann");

        let filters = FilterState {
            search: "sunday".to_string(),
            ..Default::default()
        };
        assert_eq!(view(&all, &filters, None).len(), 3);
    }

    #[test]
    fn filter_then_search_then_sort_scenario() {
        let all = roster();
        let filters = FilterState {
            status: Some("active".to_string()),
            ..Default::default()
        };
        let rows = view(
            &all,
            &filters,
            Some(SortSpec {
                field: SortField::Name,
                direction: SortDirection::Ascending,
            }),
        );
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Jan"]);
    }

    #[test]
    fn sort_is_numeric_aware_on_plates() {
        let all = roster();
        let rows = view(
            &all,
            &FilterState::default(),
            Some(SortSpec {
                field: SortField::Plate,
                direction: SortDirection::Ascending,
            }),
        );
        let plates: Vec<&str> = rows.iter().map(|r| r.plate.as_str()).collect();
        assert_eq!(plates, vec!["ABC1", "ABC2", "ABC10"]);
    }

    #[test]
    fn descending_reverses_but_keeps_membership() {
        let all = roster();
        let asc = view(
            &all,
            &FilterState::default(),
            Some(SortSpec {
                field: SortField::Plate,
                direction: SortDirection::Ascending,
            }),
        );
        let desc = view(
            &all,
            &FilterState::default(),
            Some(SortSpec {
                field: SortField::Plate,
                direction: SortDirection::Descending,
            }),
        );
        let mut reversed = desc.clone();
        reversed.reverse();
        assert_eq!(asc, reversed);
    }

    #[test]
    fn filter_and_sort_commute_on_membership() {
        let all = roster();
        let filters = FilterState {
            captain: Some("X".to_string()),
            ..Default::default()
        };
        let sort = Some(SortSpec {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        });

        let filtered_then_sorted: HashSet<String> = view(&all, &filters, sort)
            .into_iter()
            .map(|r| r.plate)
            .collect();
        let sorted_all = view(&all, &FilterState::default(), sort);
        let sorted_then_filtered: HashSet<String> = view(&sorted_all, &filters, None)
            .into_iter()
            .map(|r| r.plate)
            .collect();
        assert_eq!(filtered_then_sorted, sorted_then_filtered);
    }

    #[test]
    fn no_sort_preserves_input_order() {
        let all = roster();
        let rows = view(&all, &FilterState::default(), None);
        let plates: Vec<&str> = rows.iter().map(|r| r.plate.as_str()).collect();
        assert_eq!(plates, vec!["ABC1", "ABC2", "ABC10"]);
    }

    #[test]
    fn cycle_sort_walks_asc_desc_unsorted() {
        let first = cycle_sort(None, SortField::Name).unwrap();
        assert_eq!(first.direction, SortDirection::Ascending);
        let second = cycle_sort(Some(first), SortField::Name).unwrap();
        assert_eq!(second.direction, SortDirection::Descending);
        assert!(cycle_sort(Some(second), SortField::Name).is_none());

        // A different column resets to ascending.
        let switched = cycle_sort(Some(second), SortField::Plate).unwrap();
        assert_eq!(switched.field, SortField::Plate);
        assert_eq!(switched.direction, SortDirection::Ascending);
    }

    #[test]
    fn compare_values_handles_digit_runs() {
        assert_eq!(compare_values("cab-9", "CAB-10"), Ordering::Less);
        assert_eq!(compare_values("a2", "a2"), Ordering::Equal);
        assert_eq!(compare_values("b", "a10"), Ordering::Greater);
    }
}
