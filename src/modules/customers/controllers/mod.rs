mod customer_controller;

pub use customer_controller::{configure, create_customer, get_customer, list_customers};
