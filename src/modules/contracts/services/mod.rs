mod contract_service;

pub use contract_service::ContractService;
