pub mod domain;
pub mod dto;
pub mod error;
pub mod export;
pub mod import;
pub mod view;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use view::{cycle_sort, view, FilterState, SortDirection, SortField, SortSpec};
