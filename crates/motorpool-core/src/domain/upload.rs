use crate::domain::ids::UploadId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Insert-or-update matched on `plate`.
    Upsert,
    /// Delete everything, then insert the batch.
    Replace,
}

impl UploadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMode::Upsert => "upsert",
            UploadMode::Replace => "replace",
        }
    }
}

impl fmt::Display for UploadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(UploadMode::Upsert),
            "replace" => Ok(UploadMode::Replace),
            other => Err(CoreError::UnknownUploadMode(other.to_string())),
        }
    }
}

/// Append-only audit row written once per successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: UploadId,
    pub actor: Option<String>,
    pub file_name: String,
    pub mode: UploadMode,
    pub records_count: i64,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::UploadMode;
    use std::str::FromStr;

    #[test]
    fn mode_round_trips_through_strings() {
        for mode in [UploadMode::Upsert, UploadMode::Replace] {
            assert_eq!(UploadMode::from_str(mode.as_str()).unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_error() {
        assert!(UploadMode::from_str("merge").is_err());
    }
}
