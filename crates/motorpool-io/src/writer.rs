//! CSV artifact from projected rows.

use crate::error::{FileError, Result};
use csv::WriterBuilder;

pub fn write_csv(headers: &[String], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| FileError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::write_csv;

    #[test]
    fn writes_header_then_rows() {
        let headers = vec!["Plate".to_string(), "Name".to_string()];
        let rows = vec![
            vec!["ABC 123".to_string(), "Juan".to_string()],
            vec!["XYZ 999".to_string(), "Ann, Jr.".to_string()],
        ];
        let out = write_csv(&headers, &rows).expect("write csv");
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Plate,Name"));
        assert_eq!(lines.next(), Some("ABC 123,Juan"));
        // Values containing the delimiter get quoted.
        assert_eq!(lines.next(), Some("XYZ 999,\"Ann, Jr.\""));
    }
}
