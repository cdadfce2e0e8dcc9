pub mod drivers;
pub mod uploads;

pub use drivers::{DriverNew, DriverUpdate, DriversRepo};
pub use uploads::UploadsRepo;
