pub mod late_fine_calculator;
mod late_fine_service;

pub use late_fine_calculator::LateFineCalculator;
pub use late_fine_service::LateFineService;
