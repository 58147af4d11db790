mod amendment_repository;

pub use amendment_repository::AmendmentRepository;
