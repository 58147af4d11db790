// HTTP handlers for payment schedules
//
// Endpoints:
// - POST /payment-schedules/preview - derive a schedule from ad-hoc figures
// - GET /contracts/{id}/payment-schedule - derive a stored contract's schedule

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::core::{BusinessClock, Currency, Result};
use crate::modules::contracts::ContractService;
use crate::modules::schedules::{
    models::{PaymentScheduleEntry, ScheduleInput, ScheduleSummary},
    services::PaymentScheduleGenerator,
};

/// Request for POST /payment-schedules/preview
#[derive(Debug, Deserialize)]
pub struct PreviewScheduleRequest {
    pub start_date: NaiveDate,
    pub monthly_amount: Decimal,
    pub contract_amount: Decimal,
    #[serde(default)]
    pub total_paid: Decimal,
    /// Evaluate statuses as of this date instead of today
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    pub as_of: NaiveDate,
    pub installments: Vec<PaymentScheduleEntry>,
    pub summary: ScheduleSummary,
}

fn build_response(
    contract_id: Option<String>,
    input: &ScheduleInput,
    as_of: NaiveDate,
) -> Result<ScheduleResponse> {
    let installments = PaymentScheduleGenerator::generate(input, as_of)?;
    let summary = PaymentScheduleGenerator::summarize(&installments, input);

    Ok(ScheduleResponse {
        contract_id,
        as_of,
        installments,
        summary,
    })
}

/// POST /payment-schedules/preview
pub async fn preview_schedule(
    request: web::Json<PreviewScheduleRequest>,
    clock: web::Data<BusinessClock>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let as_of = request.as_of.unwrap_or_else(|| clock.today());
    let input = ScheduleInput {
        start_date: request.start_date,
        monthly_amount: request.monthly_amount,
        contract_amount: request.contract_amount,
        total_paid: request.total_paid,
    };

    let response = build_response(None, &input, as_of)?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /contracts/{id}/payment-schedule
pub async fn get_contract_schedule(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
    currency: web::Data<Currency>,
    clock: web::Data<BusinessClock>,
) -> Result<HttpResponse> {
    let contract = ContractService::new(pool.get_ref().clone(), *currency.get_ref())
        .get_contract(&id)
        .await?;

    let response = build_response(
        Some(contract.id.clone()),
        &contract.schedule_input(),
        clock.today(),
    )?;
    Ok(HttpResponse::Ok().json(response))
}

/// Configure schedule routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/payment-schedules/preview",
        web::post().to(preview_schedule),
    )
    .route(
        "/contracts/{id}/payment-schedule",
        web::get().to(get_contract_schedule),
    );
}
