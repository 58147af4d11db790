mod vehicle_controller;

pub use vehicle_controller::{configure, create_vehicle, get_vehicle, list_vehicles};
