// Contract amendments module
//
// pending -> approved | rejected | cancelled
// approved -> applied (writes new values onto the contract)

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    AmendmentStatus, AmendmentType, AmendmentValues, ContractAmendment, CreateAmendmentRequest,
};
pub use repositories::AmendmentRepository;
pub use services::AmendmentService;
