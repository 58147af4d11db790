// HTTP handlers for contract amendments
//
// Endpoints:
// - POST /contracts/{id}/amendments
// - GET /contracts/{id}/amendments
// - GET /amendments/{id}
// - POST /amendments/{id}/approve
// - POST /amendments/{id}/reject
// - POST /amendments/{id}/cancel
// - POST /amendments/{id}/customer-signature
// - POST /amendments/{id}/apply

use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::core::{Currency, Result};
use crate::middleware::StaffId;
use crate::modules::amendments::{
    models::{ApproveAmendmentRequest, CreateAmendmentRequest, ReasonRequest},
    services::AmendmentService,
};

fn service(pool: &web::Data<MySqlPool>, currency: &web::Data<Currency>) -> AmendmentService {
    AmendmentService::new(pool.get_ref().clone(), *currency.get_ref())
}

/// POST /contracts/{id}/amendments
pub async fn create_amendment(
    contract_id: web::Path<String>,
    staff: StaffId,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: web::Json<CreateAmendmentRequest>,
) -> Result<HttpResponse> {
    let amendment = service(&pool, &currency)
        .create(&contract_id, request.into_inner(), Some(staff.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(amendment))
}

/// GET /contracts/{id}/amendments
pub async fn list_amendments(
    contract_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
) -> Result<HttpResponse> {
    let amendments = service(&pool, &currency).list(&contract_id).await?;
    Ok(HttpResponse::Ok().json(amendments))
}

/// GET /amendments/{id}
pub async fn get_amendment(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
) -> Result<HttpResponse> {
    let amendment = service(&pool, &currency).get(&id).await?;
    Ok(HttpResponse::Ok().json(amendment))
}

/// POST /amendments/{id}/approve
pub async fn approve_amendment(
    id: web::Path<String>,
    staff: StaffId,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: Option<web::Json<ApproveAmendmentRequest>>,
) -> Result<HttpResponse> {
    let notes = request.and_then(|r| r.into_inner().notes);
    let amendment = service(&pool, &currency)
        .approve(&id, staff.as_str(), notes)
        .await?;

    Ok(HttpResponse::Ok().json(amendment))
}

/// POST /amendments/{id}/reject
pub async fn reject_amendment(
    id: web::Path<String>,
    staff: StaffId,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: web::Json<ReasonRequest>,
) -> Result<HttpResponse> {
    let amendment = service(&pool, &currency)
        .reject(&id, staff.as_str(), &request.reason)
        .await?;

    Ok(HttpResponse::Ok().json(amendment))
}

/// POST /amendments/{id}/cancel
pub async fn cancel_amendment(
    id: web::Path<String>,
    staff: StaffId,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: web::Json<ReasonRequest>,
) -> Result<HttpResponse> {
    let amendment = service(&pool, &currency)
        .cancel(&id, staff.as_str(), &request.reason)
        .await?;

    Ok(HttpResponse::Ok().json(amendment))
}

/// POST /amendments/{id}/customer-signature
pub async fn record_signature(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
) -> Result<HttpResponse> {
    let amendment = service(&pool, &currency)
        .record_customer_signature(&id)
        .await?;

    Ok(HttpResponse::Ok().json(amendment))
}

/// POST /amendments/{id}/apply
pub async fn apply_amendment(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
) -> Result<HttpResponse> {
    let amendment = service(&pool, &currency).apply(&id).await?;
    Ok(HttpResponse::Ok().json(amendment))
}

/// Configure amendment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contracts/{id}/amendments")
            .route(web::post().to(create_amendment))
            .route(web::get().to(list_amendments)),
    )
    .service(
        web::scope("/amendments")
            .route("/{id}", web::get().to(get_amendment))
            .route("/{id}/approve", web::post().to(approve_amendment))
            .route("/{id}/reject", web::post().to(reject_amendment))
            .route("/{id}/cancel", web::post().to(cancel_amendment))
            .route("/{id}/customer-signature", web::post().to(record_signature))
            .route("/{id}/apply", web::post().to(apply_amendment)),
    );
}
