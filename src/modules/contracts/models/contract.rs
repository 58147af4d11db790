use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Currency, Result};
use crate::modules::schedules::{PaymentScheduleGenerator, ScheduleInput};

/// Rental agreement linking a customer and a vehicle with financial terms
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: String,
    pub contract_number: String,
    pub customer_id: String,
    pub vehicle_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_amount: Decimal,
    /// Total contract amount
    pub contract_amount: Decimal,
    pub total_paid: Decimal,
    #[sqlx(try_from = "String")]
    pub currency: Currency,
    #[sqlx(try_from = "String")]
    pub status: ContractStatus,
    pub terms: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Contract lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active,
    Expired,
    Suspended,
    Cancelled,
    Renewed,
    UnderLegalProcedure,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Suspended => "suspended",
            Self::Cancelled => "cancelled",
            Self::Renewed => "renewed",
            Self::UnderLegalProcedure => "under_legal_procedure",
        }
    }

    /// Cancelled and renewed contracts are closed records
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Renewed)
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for ContractStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "suspended" => Ok(Self::Suspended),
            "cancelled" => Ok(Self::Cancelled),
            "renewed" => Ok(Self::Renewed),
            "under_legal_procedure" => Ok(Self::UnderLegalProcedure),
            _ => Err(format!("Invalid contract status: {}", value)),
        }
    }
}

/// The amendable part of a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_amount: Decimal,
    pub contract_amount: Decimal,
    pub vehicle_id: Option<String>,
    pub terms: Option<String>,
}

impl ContractTerms {
    /// Validate dates and amounts for `currency`
    pub fn validate(&self, currency: Currency) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(AppError::validation(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.monthly_amount <= Decimal::ZERO {
            return Err(AppError::validation("Monthly amount must be positive"));
        }

        if self.contract_amount < Decimal::ZERO {
            return Err(AppError::validation("Contract amount cannot be negative"));
        }

        currency
            .validate_amount(self.monthly_amount)
            .map_err(AppError::validation)?;
        currency
            .validate_amount(self.contract_amount)
            .map_err(AppError::validation)?;

        // Rejects totals that would derive an unreasonable number of installments
        PaymentScheduleGenerator::installment_count(self.contract_amount, self.monthly_amount)?;

        Ok(())
    }
}

/// Request payload for POST /contracts
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractRequest {
    pub contract_number: String,
    pub customer_id: String,
    pub vehicle_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_amount: Decimal,
    pub contract_amount: Decimal,
    pub currency: Option<Currency>,
    pub terms: Option<String>,
}

/// Request payload for PATCH /contracts/{id}/status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ContractStatus,
}

/// Request payload for POST /contracts/{id}/payments
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
}

/// Financial overview of a contract as of a given day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractSummary {
    pub contract_id: String,
    pub status: ContractStatus,
    pub total_amount: Decimal,
    pub monthly_amount: Decimal,
    pub total_paid: Decimal,
    pub balance_due: Decimal,
    /// Negative once the end date has passed
    pub days_remaining: i64,
    /// Elapsed share of the contract period, 0-100
    pub progress_percentage: u8,
    pub total_installments: u32,
    pub paid_installments: u32,
}

impl Contract {
    /// Build a draft contract from a create request
    pub fn new(request: CreateContractRequest, default_currency: Currency) -> Result<Self> {
        let contract_number = request.contract_number.trim().to_string();
        if contract_number.is_empty() {
            return Err(AppError::validation("Contract number is required"));
        }
        if request.customer_id.trim().is_empty() {
            return Err(AppError::validation("Customer is required"));
        }

        let currency = request.currency.unwrap_or(default_currency);
        let terms = ContractTerms {
            start_date: request.start_date,
            end_date: request.end_date,
            monthly_amount: request.monthly_amount,
            contract_amount: request.contract_amount,
            vehicle_id: request.vehicle_id,
            terms: request.terms,
        };
        terms.validate(currency)?;

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            contract_number,
            customer_id: request.customer_id,
            vehicle_id: terms.vehicle_id,
            start_date: terms.start_date,
            end_date: terms.end_date,
            monthly_amount: terms.monthly_amount,
            contract_amount: terms.contract_amount,
            total_paid: Decimal::ZERO,
            currency,
            status: ContractStatus::Draft,
            terms: terms.terms,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn current_terms(&self) -> ContractTerms {
        ContractTerms {
            start_date: self.start_date,
            end_date: self.end_date,
            monthly_amount: self.monthly_amount,
            contract_amount: self.contract_amount,
            vehicle_id: self.vehicle_id.clone(),
            terms: self.terms.clone(),
        }
    }

    /// Replace the amendable fields after validating them
    pub fn apply_terms(&mut self, terms: ContractTerms) -> Result<()> {
        terms.validate(self.currency)?;

        self.start_date = terms.start_date;
        self.end_date = terms.end_date;
        self.monthly_amount = terms.monthly_amount;
        self.contract_amount = terms.contract_amount;
        self.vehicle_id = terms.vehicle_id;
        self.terms = terms.terms;
        self.updated_at = chrono::Utc::now().naive_utc();

        Ok(())
    }

    pub fn change_status(&mut self, status: ContractStatus) -> Result<()> {
        if self.status == status {
            return Ok(());
        }
        if self.status.is_terminal() {
            return Err(AppError::validation(format!(
                "Contract {} is {} and cannot change status",
                self.contract_number, self.status
            )));
        }

        self.status = status;
        self.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }

    /// Add a received payment to the running total
    pub fn record_payment(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        self.currency
            .validate_amount(amount)
            .map_err(AppError::validation)?;
        if self.status.is_terminal() {
            return Err(AppError::validation(format!(
                "Cannot record payment on {} contract",
                self.status
            )));
        }

        self.total_paid = self
            .total_paid
            .checked_add(amount)
            .ok_or_else(|| AppError::validation("Total paid is out of range"))?;
        self.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }

    pub fn balance_due(&self) -> Decimal {
        self.contract_amount - self.total_paid
    }

    pub fn schedule_input(&self) -> ScheduleInput {
        ScheduleInput {
            start_date: self.start_date,
            monthly_amount: self.monthly_amount,
            contract_amount: self.contract_amount,
            total_paid: self.total_paid,
        }
    }

    pub fn summary(&self, today: NaiveDate) -> Result<ContractSummary> {
        let days_remaining = (self.end_date - today).num_days();
        let total_days = (self.end_date - self.start_date).num_days();

        let progress_percentage = if total_days > 0 {
            let elapsed = Decimal::from(total_days - days_remaining);
            let pct = (elapsed * Decimal::ONE_HUNDRED / Decimal::from(total_days)).round();
            pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                .to_u8()
                .unwrap_or(0)
        } else {
            0
        };

        Ok(ContractSummary {
            contract_id: self.id.clone(),
            status: self.status,
            total_amount: self.contract_amount,
            monthly_amount: self.monthly_amount,
            total_paid: self.total_paid,
            balance_due: self.balance_due(),
            days_remaining,
            progress_percentage,
            total_installments: PaymentScheduleGenerator::installment_count(
                self.contract_amount,
                self.monthly_amount,
            )?,
            paid_installments: PaymentScheduleGenerator::paid_count(
                self.total_paid,
                self.monthly_amount,
            ),
        })
    }
}
