mod amendment;
mod values;

pub use amendment::{
    amendment_number, AmendmentStatus, AmendmentType, ApproveAmendmentRequest, ContractAmendment,
    CreateAmendmentRequest, ReasonRequest,
};
pub use values::AmendmentValues;
