mod amendment_controller;

pub use amendment_controller::{
    apply_amendment, approve_amendment, cancel_amendment, configure, create_amendment,
    get_amendment, list_amendments, record_signature, reject_amendment,
};
