//! Tabular file reader: turns an uploaded `.csv`/`.xlsx`/`.xls` file into
//! raw rows for the core row parser. Only the first sheet of a workbook is
//! read, and the first row is always treated as the header row.

use crate::error::{FileError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use motorpool_core::import::{CellValue, RawRow};
use std::fmt::Display;
use std::path::Path;

pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_csv(path),
        "xlsx" | "xls" => read_workbook(path),
        other => Err(FileError::UnsupportedFormat(other.to_string())),
    }
}

fn read_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| decode(path, err))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| decode(path, err))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| decode(path, err))?;
        let row: RawRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|cell| {
                if cell.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(cell.to_string())
                }
            }))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path).map_err(|err| decode(path, err))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| decode(path, "workbook has no sheets"))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| decode(path, err))?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(header_string).collect();

    let mut rows = Vec::new();
    for sheet_row in sheet_rows {
        let row: RawRow = headers
            .iter()
            .cloned()
            .zip(sheet_row.iter().map(cell_value))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn header_string(data: &Data) -> String {
    match data {
        Data::String(value) => value.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(value) => CellValue::Text(value.clone()),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Bool(*value),
        other => CellValue::Text(other.to_string()),
    }
}

fn decode(path: &Path, message: impl Display) -> FileError {
    FileError::Decode {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motorpool_core::import::{parse_rows, split_valid};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn read_csv_preserves_header_order_and_rows() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("roster.csv");
        fs::write(
            &path,
            "Plate #,ID,Driver Name,Supervisor,RD\nABC 123,E-1,Juan,Reyes,Sunday\nXYZ 999,E-2,Ann,Santos,\n",
        )
        .expect("write csv");

        let rows = read_rows(&path).expect("read rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0].0, "Plate #");
        assert_eq!(rows[1][4].1, CellValue::Empty);

        let drafts = parse_rows(&rows);
        let (valid, invalid) = split_valid(drafts);
        assert_eq!(valid.len(), 2);
        assert!(invalid.is_empty());
        assert_eq!(valid[0].plate, "ABC 123");
        assert_eq!(valid[1].rest_day, None);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = read_rows(Path::new("roster.pdf")).unwrap_err();
        assert!(matches!(err, FileError::UnsupportedFormat(ext) if ext == "pdf"));
    }

    #[test]
    fn corrupt_workbook_surfaces_a_decode_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("broken.xlsx");
        fs::write(&path, b"definitely not a zip archive").expect("write junk");
        let err = read_rows(&path).unwrap_err();
        assert!(matches!(err, FileError::Decode { .. }));
    }
}
