//! fleetrent: car rental contract service
//!
//! Contracts, customers and vehicles, with derived payment schedules,
//! late fine assessment, an amendment approval workflow and printable
//! legal documents for court filing.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

pub use modules::amendments;
pub use modules::contracts;
pub use modules::fines;
pub use modules::legal;
pub use modules::schedules;
