// Customers module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{CreateCustomerRequest, Customer};
pub use repositories::CustomerRepository;
