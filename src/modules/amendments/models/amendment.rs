use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::amendments::models::AmendmentValues;
use crate::modules::contracts::{Contract, ContractStatus};

/// Kind of change an amendment proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentType {
    ExtendDuration,
    ChangeAmount,
    ChangeTerms,
    ChangeVehicle,
    ChangeDates,
    ChangePayment,
    Other,
}

impl AmendmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtendDuration => "extend_duration",
            Self::ChangeAmount => "change_amount",
            Self::ChangeTerms => "change_terms",
            Self::ChangeVehicle => "change_vehicle",
            Self::ChangeDates => "change_dates",
            Self::ChangePayment => "change_payment",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for AmendmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for AmendmentType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "extend_duration" => Ok(Self::ExtendDuration),
            "change_amount" => Ok(Self::ChangeAmount),
            "change_terms" => Ok(Self::ChangeTerms),
            "change_vehicle" => Ok(Self::ChangeVehicle),
            "change_dates" => Ok(Self::ChangeDates),
            "change_payment" => Ok(Self::ChangePayment),
            "other" => Ok(Self::Other),
            _ => Err(format!("Invalid amendment type: {}", value)),
        }
    }
}

/// Amendment workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    /// Written onto the contract; final
    Applied,
}

impl AmendmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Applied => "applied",
        }
    }
}

impl std::fmt::Display for AmendmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for AmendmentStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "applied" => Ok(Self::Applied),
            _ => Err(format!("Invalid amendment status: {}", value)),
        }
    }
}

/// Proposed change to a contract's terms
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContractAmendment {
    pub id: String,
    pub contract_id: String,
    pub amendment_number: String,
    #[sqlx(try_from = "String")]
    pub amendment_type: AmendmentType,
    pub reason: String,
    /// Contract values before the change (changed fields only)
    #[sqlx(json)]
    pub original_values: AmendmentValues,
    /// Contract values after the change (changed fields only)
    #[sqlx(json)]
    pub new_values: AmendmentValues,
    #[sqlx(try_from = "String")]
    pub status: AmendmentStatus,
    pub requires_customer_signature: bool,
    pub customer_signed_at: Option<NaiveDateTime>,
    pub requested_by: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub review_notes: Option<String>,
    pub applied_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for POST /contracts/{id}/amendments
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAmendmentRequest {
    pub amendment_type: AmendmentType,
    pub reason: String,
    pub new_values: AmendmentValues,
    #[serde(default)]
    pub requires_customer_signature: bool,
}

/// Request payload for POST /amendments/{id}/approve
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApproveAmendmentRequest {
    pub notes: Option<String>,
}

/// Request payload for reject and cancel
#[derive(Debug, Clone, Deserialize)]
pub struct ReasonRequest {
    pub reason: String,
}

impl ContractAmendment {
    /// Build a pending amendment against `contract`.
    ///
    /// Only fields that differ from the contract are kept.
    pub fn propose(
        contract: &Contract,
        request: CreateAmendmentRequest,
        amendment_number: String,
        requested_by: Option<String>,
    ) -> Result<Self> {
        if contract.status != ContractStatus::Active {
            return Err(AppError::validation(format!(
                "Only active contracts can be amended; contract {} is {}",
                contract.contract_number, contract.status
            )));
        }

        let reason = request.reason.trim().to_string();
        if reason.is_empty() {
            return Err(AppError::validation("Amendment reason is required"));
        }

        let current = contract.current_terms();
        let (original_values, new_values) = AmendmentValues::diff(&current, &request.new_values);

        if new_values.is_empty() {
            return Err(AppError::validation(
                "Amendment does not change any contract value",
            ));
        }

        Self::check_type(request.amendment_type, &current.end_date, &new_values)?;

        // Reject proposals that could never be applied
        new_values.apply_to(current).validate(contract.currency)?;

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            contract_id: contract.id.clone(),
            amendment_number,
            amendment_type: request.amendment_type,
            reason,
            original_values,
            new_values,
            status: AmendmentStatus::Pending,
            requires_customer_signature: request.requires_customer_signature,
            customer_signed_at: None,
            requested_by,
            reviewed_by: None,
            reviewed_at: None,
            review_notes: None,
            applied_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn check_type(
        amendment_type: AmendmentType,
        current_end: &chrono::NaiveDate,
        new_values: &AmendmentValues,
    ) -> Result<()> {
        let ok = match amendment_type {
            AmendmentType::ExtendDuration => {
                return match new_values.end_date {
                    Some(end) if end > *current_end => Ok(()),
                    Some(end) => Err(AppError::validation(format!(
                        "Extension end date {} must be after current end date {}",
                        end, current_end
                    ))),
                    None => Err(AppError::validation(
                        "Duration extension requires a new end date",
                    )),
                };
            }
            AmendmentType::ChangeAmount => {
                new_values.monthly_amount.is_some() || new_values.contract_amount.is_some()
            }
            AmendmentType::ChangePayment => new_values.monthly_amount.is_some(),
            AmendmentType::ChangeVehicle => new_values.vehicle_id.is_some(),
            AmendmentType::ChangeDates => {
                new_values.start_date.is_some() || new_values.end_date.is_some()
            }
            AmendmentType::ChangeTerms => new_values.terms.is_some(),
            AmendmentType::Other => true,
        };

        if ok {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Amendment of type {} does not change a matching contract value",
                amendment_type
            )))
        }
    }

    fn require_status(&self, expected: AmendmentStatus, action: &str) -> Result<()> {
        if self.status != expected {
            return Err(AppError::validation(format!(
                "Cannot {} amendment {}: status is {}, expected {}",
                action, self.amendment_number, self.status, expected
            )));
        }
        Ok(())
    }

    fn review(&mut self, status: AmendmentStatus, reviewer: &str, notes: Option<String>) {
        let now = chrono::Utc::now().naive_utc();
        self.status = status;
        self.reviewed_by = Some(reviewer.to_string());
        self.reviewed_at = Some(now);
        self.review_notes = notes;
        self.updated_at = now;
    }

    /// pending -> approved
    pub fn approve(&mut self, reviewer: &str, notes: Option<String>) -> Result<()> {
        self.require_status(AmendmentStatus::Pending, "approve")?;
        self.review(
            AmendmentStatus::Approved,
            reviewer,
            notes.filter(|n| !n.trim().is_empty()),
        );
        Ok(())
    }

    /// pending -> rejected; a reason is mandatory
    pub fn reject(&mut self, reviewer: &str, reason: &str) -> Result<()> {
        self.require_status(AmendmentStatus::Pending, "reject")?;
        if reason.trim().is_empty() {
            return Err(AppError::validation("Rejection reason is required"));
        }
        self.review(AmendmentStatus::Rejected, reviewer, Some(reason.trim().to_string()));
        Ok(())
    }

    /// pending -> cancelled
    pub fn cancel(&mut self, actor: &str, reason: &str) -> Result<()> {
        self.require_status(AmendmentStatus::Pending, "cancel")?;
        if reason.trim().is_empty() {
            return Err(AppError::validation("Cancellation reason is required"));
        }
        self.review(AmendmentStatus::Cancelled, actor, Some(reason.trim().to_string()));
        Ok(())
    }

    /// Record the customer's re-signature of the amended contract
    pub fn record_customer_signature(&mut self) -> Result<()> {
        if !self.requires_customer_signature {
            return Err(AppError::validation(format!(
                "Amendment {} does not require a customer signature",
                self.amendment_number
            )));
        }
        if !matches!(
            self.status,
            AmendmentStatus::Pending | AmendmentStatus::Approved
        ) {
            return Err(AppError::validation(format!(
                "Cannot sign amendment {} with status {}",
                self.amendment_number, self.status
            )));
        }
        if self.customer_signed_at.is_some() {
            return Err(AppError::validation(format!(
                "Amendment {} is already signed",
                self.amendment_number
            )));
        }

        let now = chrono::Utc::now().naive_utc();
        self.customer_signed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Whether `apply` may run now
    pub fn check_applicable(&self) -> Result<()> {
        self.require_status(AmendmentStatus::Approved, "apply")?;
        if self.requires_customer_signature && self.customer_signed_at.is_none() {
            return Err(AppError::validation(format!(
                "Amendment {} requires the customer's signature before it can be applied",
                self.amendment_number
            )));
        }
        Ok(())
    }

    /// approved -> applied. Writes the new values onto `contract`.
    pub fn apply(&mut self, contract: &mut Contract) -> Result<()> {
        self.check_applicable()?;

        if contract.id != self.contract_id {
            return Err(AppError::internal(format!(
                "Amendment {} belongs to contract {}, not {}",
                self.amendment_number, self.contract_id, contract.id
            )));
        }
        if contract.status.is_terminal() {
            return Err(AppError::validation(format!(
                "Contract {} is {} and can no longer be amended",
                contract.contract_number, contract.status
            )));
        }

        let terms = self.new_values.apply_to(contract.current_terms());
        contract.apply_terms(terms)?;

        let now = chrono::Utc::now().naive_utc();
        self.status = AmendmentStatus::Applied;
        self.applied_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

/// `AMD-<contract number>-<sequence>`
pub fn amendment_number(contract_number: &str, sequence: i64) -> String {
    format!("AMD-{}-{:02}", contract_number, sequence)
}
