mod vehicle;

pub use vehicle::{CreateVehicleRequest, Vehicle};
