// HTTP handlers for late fines
//
// Endpoints:
// - POST /late-fines/preview
// - GET /contracts/{id}/late-fine
// - GET /late-fine-settings
// - PUT /late-fine-settings

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::{BusinessClock, Currency, Result};
use crate::modules::fines::{
    models::{LateFineInput, LateFineSettings, SaveFineSettingsRequest},
    services::{LateFineCalculator, LateFineService},
};

/// Request for POST /late-fines/preview
#[derive(Debug, Deserialize)]
pub struct PreviewFineRequest {
    pub contract_amount: Decimal,
    pub end_date: NaiveDate,
    pub settings: SaveFineSettingsRequest,
    pub currency: Option<Currency>,
    pub as_of: Option<NaiveDate>,
}

/// POST /late-fines/preview
pub async fn preview_fine(
    request: web::Json<PreviewFineRequest>,
    currency: web::Data<Currency>,
    clock: web::Data<BusinessClock>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let settings = LateFineSettings::new(request.settings)?;
    let input = LateFineInput {
        contract_amount: request.contract_amount,
        end_date: request.end_date,
    };

    let assessment = LateFineCalculator::calculate(
        &input,
        &settings,
        request.currency.unwrap_or(*currency.get_ref()),
        request.as_of.unwrap_or_else(|| clock.today()),
    )?;

    Ok(HttpResponse::Ok().json(assessment))
}

/// GET /contracts/{id}/late-fine
pub async fn get_contract_fine(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    clock: web::Data<BusinessClock>,
) -> Result<HttpResponse> {
    let assessment = LateFineService::new(pool.get_ref().clone(), *currency.get_ref())
        .assess_contract(&id, clock.today())
        .await?;

    Ok(HttpResponse::Ok().json(assessment))
}

/// GET /late-fine-settings
pub async fn get_settings(
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
) -> Result<HttpResponse> {
    let settings = LateFineService::new(pool.get_ref().clone(), *currency.get_ref())
        .current_settings()
        .await?;

    Ok(HttpResponse::Ok().json(settings))
}

/// PUT /late-fine-settings
pub async fn update_settings(
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    request: web::Json<SaveFineSettingsRequest>,
) -> Result<HttpResponse> {
    let settings = LateFineService::new(pool.get_ref().clone(), *currency.get_ref())
        .update_settings(request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(settings))
}

/// Configure late fine routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/late-fines/preview", web::post().to(preview_fine))
        .route("/contracts/{id}/late-fine", web::get().to(get_contract_fine))
        .service(
            web::resource("/late-fine-settings")
                .route(web::get().to(get_settings))
                .route(web::put().to(update_settings)),
        );
}
