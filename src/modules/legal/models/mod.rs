mod case_data;
mod document;

pub use case_data::{
    AttachedDocument, ClaimFigures, ContractDetails, CustomerParty, InvoiceClaim, LegalCaseData,
    TrafficViolation, VehicleDetails,
};
pub use document::{DocumentKind, GeneratedDocument, LegalDocumentRecord};
