mod contract_controller;

pub use contract_controller::{
    change_status, configure, create_contract, get_contract, get_contract_summary,
    list_contracts, record_payment,
};
