use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Renter record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: String,
    /// Human-facing code printed on documents when no national id is known
    pub customer_code: String,
    pub full_name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for POST /customers
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub customer_code: String,
    pub full_name: String,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    pub fn new(request: CreateCustomerRequest) -> Result<Self> {
        let customer_code = request.customer_code.trim().to_string();
        let full_name = request.full_name.trim().to_string();

        if customer_code.is_empty() {
            return Err(AppError::validation("Customer code is required"));
        }
        if full_name.is_empty() {
            return Err(AppError::validation("Customer name is required"));
        }
        if let Some(ref email) = request.email {
            if !email.contains('@') {
                return Err(AppError::validation(format!(
                    "Invalid customer email: {}",
                    email
                )));
            }
        }

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            customer_code,
            full_name,
            national_id: non_blank(request.national_id),
            phone: non_blank(request.phone),
            email: non_blank(request.email),
            address: non_blank(request.address),
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
