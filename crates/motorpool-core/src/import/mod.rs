pub mod header;
pub mod row;

pub use header::normalize_header;
pub use row::{parse_rows, split_valid, CellValue, DraftRecord, RawRow};
