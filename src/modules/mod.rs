pub mod amendments;
pub mod common;
pub mod contracts;
pub mod customers;
pub mod fines;
pub mod health;
pub mod legal;
pub mod schedules;
pub mod vehicles;

use actix_web::web;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(customers::controllers::configure)
        .configure(vehicles::controllers::configure)
        .configure(contracts::controllers::configure)
        .configure(schedules::controllers::configure)
        .configure(fines::controllers::configure)
        .configure(amendments::controllers::configure)
        .configure(legal::controllers::configure);
}
