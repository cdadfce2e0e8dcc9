//! Applies an upload batch against the roster.
//!
//! `replace` runs as two sequential units of work: delete everything, then
//! insert the batch. There is deliberately no wrapping transaction, so a
//! failure between the phases leaves the roster empty. That risk is
//! accepted and surfaced to operators instead of being hidden behind
//! retries that could double-apply.

use crate::error::{Result, StoreError};
use crate::repo::{DriverNew, DriverUpdate};
use crate::Store;
use motorpool_core::domain::{UploadMode, UploadRecord};
use motorpool_core::import::DraftRecord;

#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub records_applied: usize,
    pub audit: UploadRecord,
}

/// Apply a batch of already-validated drafts. The batch must be non-empty;
/// an upload whose rows all failed validation is reported, not silently
/// accepted. On success an audit row is appended and the applied count
/// returned.
pub fn apply_upload(
    store: &Store,
    now_utc: i64,
    actor: Option<&str>,
    file_name: &str,
    mode: UploadMode,
    batch: &[DraftRecord],
) -> Result<ApplyOutcome> {
    if batch.is_empty() {
        return Err(StoreError::EmptyBatch);
    }

    let drivers = store.drivers();
    match mode {
        UploadMode::Replace => {
            drivers.delete_all()?;
            for draft in batch {
                drivers.create(now_utc, new_from_draft(draft))?;
            }
        }
        UploadMode::Upsert => {
            for draft in batch {
                // Conflict resolution key is always the plate, never the
                // employee id.
                match drivers.get_by_plate(&draft.plate)? {
                    Some(existing) => {
                        drivers.update(now_utc, existing.id, update_from_draft(draft))?;
                    }
                    None => {
                        drivers.create(now_utc, new_from_draft(draft))?;
                    }
                }
            }
        }
    }

    let audit = store
        .uploads()
        .append(now_utc, actor, file_name, mode, batch.len() as i64)?;

    Ok(ApplyOutcome {
        records_applied: batch.len(),
        audit,
    })
}

fn new_from_draft(draft: &DraftRecord) -> DriverNew {
    DriverNew {
        plate: draft.plate.clone(),
        employee_id: draft.employee_id.clone(),
        name: draft.name.clone(),
        phone: draft.phone.clone(),
        telegram_phone: draft.telegram_phone.clone(),
        captain: draft.captain.clone(),
        schedule: draft.schedule.clone(),
        rest_day: draft.rest_day.clone(),
        status: Some(draft.status.clone()),
    }
}

fn update_from_draft(draft: &DraftRecord) -> DriverUpdate {
    DriverUpdate {
        plate: Some(draft.plate.clone()),
        employee_id: Some(draft.employee_id.clone()),
        name: Some(draft.name.clone()),
        phone: Some(draft.phone.clone()),
        telegram_phone: Some(draft.telegram_phone.clone()),
        captain: Some(draft.captain.clone()),
        schedule: Some(draft.schedule.clone()),
        rest_day: Some(draft.rest_day.clone()),
        status: Some(draft.status.clone()),
    }
}
