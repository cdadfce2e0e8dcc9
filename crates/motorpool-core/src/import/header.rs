//! Maps the column headers people actually type into spreadsheets onto the
//! canonical field keys. Matching is trim + lowercase against a fixed,
//! ordered synonym slice; unknown headers pass through lowercased and the
//! row parser simply ignores them.

/// Canonical field keys, in display order.
pub const FIELD_KEYS: &[&str] = &[
    "plate",
    "employee_id",
    "name",
    "phone",
    "telegram_phone",
    "captain",
    "schedule",
    "rest_day",
    "status",
];

const HEADER_SYNONYMS: &[(&str, &str)] = &[
    ("plate", "plate"),
    ("plate #", "plate"),
    ("plate#", "plate"),
    ("plate no", "plate"),
    ("plate no.", "plate"),
    ("plate number", "plate"),
    ("plate_number", "plate"),
    ("id", "employee_id"),
    ("employee id", "employee_id"),
    ("employee_id", "employee_id"),
    ("employee no", "employee_id"),
    ("emp id", "employee_id"),
    ("name", "name"),
    ("driver", "name"),
    ("driver name", "name"),
    ("driver_name", "name"),
    ("full name", "name"),
    ("phone", "phone"),
    ("phone number", "phone"),
    ("phone_number", "phone"),
    ("mobile", "phone"),
    ("mobile number", "phone"),
    ("contact", "phone"),
    ("contact number", "phone"),
    ("telegram", "telegram_phone"),
    ("telegram phone", "telegram_phone"),
    ("telegram_phone", "telegram_phone"),
    ("telegram number", "telegram_phone"),
    ("captain", "captain"),
    ("supervisor", "captain"),
    ("team captain", "captain"),
    ("schedule", "schedule"),
    ("sched", "schedule"),
    ("shift", "schedule"),
    ("rd", "rest_day"),
    ("rest day", "rest_day"),
    ("rest_day", "rest_day"),
    ("restday", "rest_day"),
    ("status", "status"),
];

/// Total function: every header maps to something, known or not.
pub fn normalize_header(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    for (synonym, canonical) in HEADER_SYNONYMS {
        if *synonym == key {
            return (*canonical).to_string();
        }
    }
    key
}
