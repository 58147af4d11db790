use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::vehicles::models::Vehicle;

/// Repository for vehicle database operations
pub struct VehicleRepository {
    pool: MySqlPool,
}

impl VehicleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, plate_number, make, model, year, color, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.plate_number)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.color)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Vehicle with plate '{}' already exists",
                        vehicle.plate_number
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, plate_number, make, model, year, color, created_at, updated_at
            FROM vehicles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, plate_number, make, model, year, color, created_at, updated_at
            FROM vehicles
            ORDER BY plate_number
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }
}
