pub mod driver;
pub mod ids;
pub mod phone;
pub mod upload;

pub use driver::{DriverRecord, DEFAULT_STATUS};
pub use ids::{DriverId, UploadId};
pub use upload::{UploadMode, UploadRecord};
