use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// How a late fine accrues per overdue day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineType {
    /// `rate` percent of the contract amount per day
    Percentage,
    /// `rate` currency units per day
    FixedDaily,
}

impl FineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedDaily => "fixed_daily",
        }
    }
}

impl std::fmt::Display for FineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for FineType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "percentage" => Ok(Self::Percentage),
            "fixed_daily" => Ok(Self::FixedDaily),
            _ => Err(format!("Invalid fine type: {}", value)),
        }
    }
}

/// Company-wide late fine configuration. The newest row is current.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LateFineSettings {
    pub id: String,
    #[sqlx(try_from = "String")]
    pub fine_type: FineType,
    pub rate: Decimal,
    pub grace_period_days: i32,
    /// Cap on the total fine; `None` or zero means uncapped
    pub max_fine_amount: Option<Decimal>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for PUT /late-fine-settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFineSettingsRequest {
    pub fine_type: FineType,
    pub rate: Decimal,
    #[serde(default)]
    pub grace_period_days: i32,
    pub max_fine_amount: Option<Decimal>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl SaveFineSettingsRequest {
    pub fn validate(&self) -> Result<()> {
        if self.rate < Decimal::ZERO {
            return Err(AppError::validation("Fine rate cannot be negative"));
        }
        if self.fine_type == FineType::Percentage && self.rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Percentage fine rate must be at most 100, got {}",
                self.rate
            )));
        }
        if self.grace_period_days < 0 {
            return Err(AppError::validation("Grace period cannot be negative"));
        }
        if let Some(max) = self.max_fine_amount {
            if max < Decimal::ZERO {
                return Err(AppError::validation("Maximum fine cannot be negative"));
            }
        }
        Ok(())
    }
}

impl LateFineSettings {
    pub fn new(request: SaveFineSettingsRequest) -> Result<Self> {
        request.validate()?;

        let now = chrono::Utc::now().naive_utc();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            fine_type: request.fine_type,
            rate: request.rate,
            grace_period_days: request.grace_period_days,
            max_fine_amount: request.max_fine_amount,
            is_active: request.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Settings used before any have been saved: disabled, 5% after 3 days
    pub fn fallback() -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: "default".to_string(),
            fine_type: FineType::Percentage,
            rate: Decimal::new(5, 0),
            grace_period_days: 3,
            max_fine_amount: None,
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Cap that actually applies, if any
    pub fn effective_cap(&self) -> Option<Decimal> {
        self.max_fine_amount.filter(|max| *max > Decimal::ZERO)
    }
}

/// Figures a fine is computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateFineInput {
    pub contract_amount: Decimal,
    pub end_date: NaiveDate,
}

/// Result of a late fine calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LateFineAssessment {
    pub as_of: NaiveDate,
    /// Days past the end date; zero or negative when not overdue
    pub days_overdue: i64,
    pub grace_period_days: i32,
    /// Days past the grace period that accrue a fine
    pub effective_days: i64,
    pub fine_type: FineType,
    pub rate: Decimal,
    pub fine_amount: Decimal,
    /// True when the cap reduced the fine
    pub capped: bool,
    pub contract_amount: Decimal,
    pub total_due: Decimal,
}

impl LateFineAssessment {
    pub fn is_overdue(&self) -> bool {
        self.days_overdue > 0
    }
}
