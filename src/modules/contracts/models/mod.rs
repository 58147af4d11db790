mod contract;

pub use contract::{
    Contract, ContractStatus, ContractSummary, ContractTerms, CreateContractRequest,
    RecordPaymentRequest, UpdateStatusRequest,
};
