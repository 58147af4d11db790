// Vehicles module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{CreateVehicleRequest, Vehicle};
pub use repositories::VehicleRepository;
