// HTTP handlers for contract endpoints
//
// Endpoints:
// - POST /contracts
// - GET /contracts?status=&limit=&offset=
// - GET /contracts/{id}
// - GET /contracts/{id}/summary
// - PATCH /contracts/{id}/status
// - POST /contracts/{id}/payments

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::{BusinessClock, Currency, Result};
use crate::modules::common::ListQuery;
use crate::modules::contracts::{
    models::{ContractStatus, CreateContractRequest, RecordPaymentRequest, UpdateStatusRequest},
    services::ContractService,
};

#[derive(Debug, Deserialize)]
pub struct ContractFilter {
    pub status: Option<ContractStatus>,
}

fn service(pool: &web::Data<MySqlPool>, currency: &web::Data<Currency>) -> ContractService {
    ContractService::new(pool.get_ref().clone(), *currency.get_ref())
}

/// POST /contracts
pub async fn create_contract(
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: web::Json<CreateContractRequest>,
) -> Result<HttpResponse> {
    let contract = service(&pool, &currency)
        .create_contract(request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(contract))
}

/// GET /contracts
pub async fn list_contracts(
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    filter: web::Query<ContractFilter>,
    page: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let (limit, offset) = page.bounds()?;
    let contracts = service(&pool, &currency)
        .list_contracts(filter.status, limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(contracts))
}

/// GET /contracts/{id}
pub async fn get_contract(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
) -> Result<HttpResponse> {
    let contract = service(&pool, &currency).get_contract(&id).await?;
    Ok(HttpResponse::Ok().json(contract))
}

/// GET /contracts/{id}/summary
pub async fn get_contract_summary(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    clock: web::Data<BusinessClock>,
) -> Result<HttpResponse> {
    let summary = service(&pool, &currency)
        .summary(&id, clock.today())
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// PATCH /contracts/{id}/status
pub async fn change_status(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse> {
    let contract = service(&pool, &currency)
        .change_status(&id, request.status)
        .await?;

    Ok(HttpResponse::Ok().json(contract))
}

/// POST /contracts/{id}/payments
pub async fn record_payment(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse> {
    let contract = service(&pool, &currency)
        .record_payment(&id, request.amount)
        .await?;

    Ok(HttpResponse::Ok().json(contract))
}

/// Configure contract routes
///
/// Other modules also register routes below `/contracts/{id}`, so these are
/// plain resources rather than a `/contracts` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contracts")
            .route(web::post().to(create_contract))
            .route(web::get().to(list_contracts)),
    )
    .route("/contracts/{id}", web::get().to(get_contract))
    .route("/contracts/{id}/summary", web::get().to(get_contract_summary))
    .route("/contracts/{id}/status", web::patch().to(change_status))
    .route("/contracts/{id}/payments", web::post().to(record_payment));
}
