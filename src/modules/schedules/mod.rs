// Payment schedules module
//
// Schedules are derived from the contract on every read and never persisted.

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{PaymentScheduleEntry, ScheduleEntryStatus, ScheduleInput, ScheduleSummary};
pub use services::PaymentScheduleGenerator;
