use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The upload could not be decoded as tabular data at all. Fatal to the
    /// whole import; per-row problems never surface here.
    #[error("cannot decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),
    #[error("csv write error: {0}")]
    CsvWrite(#[from] csv::Error),
    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, FileError>;
