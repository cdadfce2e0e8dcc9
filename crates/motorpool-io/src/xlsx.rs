//! Workbook artifact from projected rows.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;

/// Writes a single-sheet workbook with a bold header row.
pub fn write_xlsx(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Drivers")?;

    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(row_idx as u32 + 1, col as u16, value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
