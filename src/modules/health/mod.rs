// Health module: liveness, readiness and service index

pub mod controllers;

pub use controllers::configure;
