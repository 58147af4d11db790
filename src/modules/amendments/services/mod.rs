mod amendment_service;

pub use amendment_service::AmendmentService;
