// HTTP handlers for legal documents
//
// Endpoints:
// - POST /legal-documents/{kind}/render
// - POST /contracts/{id}/legal-documents/{kind}
// - GET /contracts/{id}/legal-documents
// - GET /legal-documents/{id}/content

use actix_web::{http::header::ContentType, web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::{AppError, BusinessClock, Currency, Result};
use crate::modules::legal::{
    models::{DocumentKind, LegalCaseData},
    services::{DocumentStorage, GenerateDocumentRequest, LegalDocumentGenerator, LegalDocumentService},
};

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    /// Document date; today in the business timezone when absent
    pub as_of: Option<NaiveDate>,
}

fn parse_kind(kind: &str) -> Result<DocumentKind> {
    kind.parse()
        .map_err(|_| AppError::not_found(format!("Unknown legal document kind '{}'", kind)))
}

fn service(
    pool: &web::Data<MySqlPool>,
    currency: &web::Data<Currency>,
    generator: &web::Data<LegalDocumentGenerator>,
    storage: &web::Data<DocumentStorage>,
) -> LegalDocumentService {
    LegalDocumentService::new(
        pool.get_ref().clone(),
        *currency.get_ref(),
        generator.clone().into_inner(),
        storage.get_ref().clone(),
    )
}

/// POST /legal-documents/{kind}/render
///
/// Renders without touching the database; responds with the HTML itself.
pub async fn render_document(
    kind: web::Path<String>,
    query: web::Query<RenderQuery>,
    data: web::Json<LegalCaseData>,
    generator: web::Data<LegalDocumentGenerator>,
    currency: web::Data<Currency>,
    clock: web::Data<BusinessClock>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let today = query.as_of.unwrap_or_else(|| clock.today());

    let document = generator.render(kind, &data, *currency.get_ref(), today)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header(("X-Reference-Number", document.reference_number))
        .insert_header(("X-Content-SHA256", document.content_sha256))
        .body(document.html))
}

/// POST /contracts/{id}/legal-documents/{kind}
pub async fn generate_contract_document(
    path: web::Path<(String, String)>,
    request: Option<web::Json<GenerateDocumentRequest>>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    clock: web::Data<BusinessClock>,
    generator: web::Data<LegalDocumentGenerator>,
    storage: web::Data<DocumentStorage>,
) -> Result<HttpResponse> {
    let (contract_id, kind) = path.into_inner();
    let kind = parse_kind(&kind)?;
    let request = request.map(|r| r.into_inner()).unwrap_or_default();

    let document = service(&pool, &currency, &generator, &storage)
        .generate_for_contract(&contract_id, kind, request, clock.today())
        .await?;

    Ok(HttpResponse::Created().json(document))
}

/// GET /contracts/{id}/legal-documents
pub async fn list_contract_documents(
    contract_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    generator: web::Data<LegalDocumentGenerator>,
    storage: web::Data<DocumentStorage>,
) -> Result<HttpResponse> {
    let records = service(&pool, &currency, &generator, &storage)
        .list_for_contract(&contract_id)
        .await?;

    Ok(HttpResponse::Ok().json(records))
}

/// GET /legal-documents/{id}/content
pub async fn document_content(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    generator: web::Data<LegalDocumentGenerator>,
    storage: web::Data<DocumentStorage>,
) -> Result<HttpResponse> {
    let body = service(&pool, &currency, &generator, &storage)
        .content(&id)
        .await?;

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(body))
}

/// Configure legal document routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/legal-documents/{kind}/render",
        web::post().to(render_document),
    )
    .route(
        "/legal-documents/{id}/content",
        web::get().to(document_content),
    )
    .route(
        "/contracts/{id}/legal-documents",
        web::get().to(list_contract_documents),
    )
    .route(
        "/contracts/{id}/legal-documents/{kind}",
        web::post().to(generate_contract_document),
    );
}
