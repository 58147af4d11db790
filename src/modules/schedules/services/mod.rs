pub mod payment_schedule;

pub use payment_schedule::PaymentScheduleGenerator;
