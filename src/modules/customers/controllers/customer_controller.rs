// HTTP handlers for customer endpoints
//
// Endpoints:
// - POST /customers
// - GET /customers
// - GET /customers/{id}

use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::common::ListQuery;
use crate::modules::customers::{
    models::{CreateCustomerRequest, Customer},
    repositories::CustomerRepository,
};

/// POST /customers
pub async fn create_customer(
    pool: web::Data<MySqlPool>,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse> {
    let customer = Customer::new(request.into_inner())?;
    CustomerRepository::new(pool.get_ref().clone())
        .create(&customer)
        .await?;

    tracing::info!(
        customer_id = customer.id.as_str(),
        customer_code = customer.customer_code.as_str(),
        "Customer created"
    );

    Ok(HttpResponse::Created().json(customer))
}

/// GET /customers/{id}
pub async fn get_customer(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let customer = CustomerRepository::new(pool.get_ref().clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {} not found", id)))?;

    Ok(HttpResponse::Ok().json(customer))
}

/// GET /customers
pub async fn list_customers(
    query: web::Query<ListQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let (limit, offset) = query.bounds()?;
    let customers = CustomerRepository::new(pool.get_ref().clone())
        .list(limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(customers))
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("", web::get().to(list_customers))
            .route("/{id}", web::get().to(get_customer)),
    );
}
