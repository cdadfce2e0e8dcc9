use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("plate is required")]
    EmptyPlate,
    #[error("employee id is required")]
    EmptyEmployeeId,
    #[error("driver name is required")]
    EmptyName,
    #[error("captain is required")]
    EmptyCaptain,
    #[error("no export columns selected")]
    NoColumnsSelected,
    #[error("unknown export column: {0}")]
    UnknownColumn(String),
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("unknown upload mode: {0}")]
    UnknownUploadMode(String),
}
