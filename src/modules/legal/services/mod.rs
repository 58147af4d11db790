pub mod document_generator;
pub mod document_store;
pub mod legal_document_service;

pub use document_generator::{
    content_sha256, format_duration_ar, reference_number, ClaimTotals, LegalDocumentGenerator,
};
pub use document_store::{DocumentStorage, DocumentStore, HttpDocumentStore};
pub use legal_document_service::{ContractDocument, GenerateDocumentRequest, LegalDocumentService};
