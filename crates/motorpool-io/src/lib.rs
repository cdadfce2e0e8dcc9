pub mod error;
pub mod html;
pub mod reader;
pub mod vcf;
pub mod writer;
pub mod xlsx;

pub use error::{FileError, Result};
