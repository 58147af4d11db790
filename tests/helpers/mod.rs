// Test helpers for database-backed integration tests
//
// Usage from a test file under tests/integration/:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod test_database;

pub use test_database::*;
