use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Fleet vehicle
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: String,
    pub plate_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicleRequest {
    pub plate_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
}

impl Vehicle {
    pub fn new(request: CreateVehicleRequest) -> Result<Self> {
        let plate_number = request.plate_number.trim().to_string();
        if plate_number.is_empty() {
            return Err(AppError::validation("Plate number is required"));
        }

        let now = chrono::Utc::now().naive_utc();

        if let Some(year) = request.year {
            let latest = now.year() + 1;
            if year < 1950 || year > latest {
                return Err(AppError::validation(format!(
                    "Vehicle year must be between 1950 and {}, got {}",
                    latest, year
                )));
            }
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            plate_number,
            make: request.make,
            model: request.model,
            year: request.year,
            color: request.color,
            created_at: now,
            updated_at: now,
        })
    }

    /// "Toyota Camry 2022" style description, empty parts skipped
    pub fn description(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        [self.make.as_deref(), self.model.as_deref(), year.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
