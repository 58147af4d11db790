// Late fines module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{FineType, LateFineAssessment, LateFineSettings, SaveFineSettingsRequest};
pub use repositories::LateFineSettingsRepository;
pub use services::{LateFineCalculator, LateFineService};
