use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::common::ListQuery;
use crate::modules::vehicles::{
    models::{CreateVehicleRequest, Vehicle},
    repositories::VehicleRepository,
};

/// POST /vehicles
pub async fn create_vehicle(
    pool: web::Data<MySqlPool>,
    request: web::Json<CreateVehicleRequest>,
) -> Result<HttpResponse> {
    let vehicle = Vehicle::new(request.into_inner())?;
    VehicleRepository::new(pool.get_ref().clone())
        .create(&vehicle)
        .await?;

    tracing::info!(
        vehicle_id = vehicle.id.as_str(),
        plate_number = vehicle.plate_number.as_str(),
        "Vehicle registered"
    );

    Ok(HttpResponse::Created().json(vehicle))
}

/// GET /vehicles/{id}
pub async fn get_vehicle(
    id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let vehicle = VehicleRepository::new(pool.get_ref().clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Vehicle {} not found", id)))?;

    Ok(HttpResponse::Ok().json(vehicle))
}

/// GET /vehicles
pub async fn list_vehicles(
    query: web::Query<ListQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let (limit, offset) = query.bounds()?;
    let vehicles = VehicleRepository::new(pool.get_ref().clone())
        .list(limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(vehicles))
}

/// Configure vehicle routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vehicles")
            .route("", web::post().to(create_vehicle))
            .route("", web::get().to(list_vehicles))
            .route("/{id}", web::get().to(get_vehicle)),
    );
}
