mod legal_controller;

pub use legal_controller::{
    configure, document_content, generate_contract_document, list_contract_documents,
    render_document,
};
