// Legal documents module
//
// Printable Arabic court documents rendered from contract data,
// optionally uploaded to object storage and recorded per contract.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DocumentKind, GeneratedDocument, LegalCaseData, LegalDocumentRecord};
pub use repositories::LegalDocumentRepository;
pub use services::{DocumentStorage, DocumentStore, LegalDocumentGenerator, LegalDocumentService};
