pub mod legal_document_repository;

pub use legal_document_repository::LegalDocumentRepository;
