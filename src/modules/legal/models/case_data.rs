use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;

/// Everything a legal document can print about one case.
///
/// Amounts are raw decimals; the generator formats them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalCaseData {
    pub customer: CustomerParty,
    #[serde(default)]
    pub vehicle: VehicleDetails,
    pub contract: ContractDetails,
    #[serde(default)]
    pub claim: ClaimFigures,
    #[serde(default)]
    pub invoices: Vec<InvoiceClaim>,
    #[serde(default)]
    pub violations: Vec<TrafficViolation>,
    #[serde(default)]
    pub documents: Vec<AttachedDocument>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Currency of every amount; defaults to the service currency
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// The defendant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerParty {
    pub full_name: String,
    #[serde(default)]
    pub customer_code: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleDetails {
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub chassis_number: Option<String>,
}

impl VehicleDetails {
    /// "Toyota Camry 2022", skipping unknown parts
    pub fn description(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        [self.make.as_deref(), self.model.as_deref(), year.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn plate(&self) -> Option<&str> {
        self.plate_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDetails {
    pub contract_number: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub monthly_amount: Decimal,
    #[serde(default)]
    pub contract_amount: Option<Decimal>,
}

/// Claim figures for the memo and the claims statement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimFigures {
    /// Unpaid rent that is past due
    #[serde(default)]
    pub overdue_rent: Decimal,
    #[serde(default)]
    pub late_penalty: Decimal,
    /// Compensation claimed; 30% of rent plus penalty when absent
    #[serde(default)]
    pub damages: Option<Decimal>,
    #[serde(default)]
    pub days_overdue: i64,
}

/// One unpaid invoice row of the claims statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceClaim {
    pub invoice_number: String,
    pub due_date: NaiveDate,
    pub total_amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub days_late: i64,
    #[serde(default)]
    pub penalty: Decimal,
}

impl InvoiceClaim {
    pub fn remaining(&self) -> Decimal {
        self.total_amount
            .saturating_sub(self.paid_amount)
            .max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficViolation {
    pub violation_number: String,
    #[serde(default)]
    pub violation_date: Option<NaiveDate>,
    #[serde(default)]
    pub violation_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub fine_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachedDocument {
    pub name: String,
    #[serde(default = "default_attached")]
    pub attached: bool,
}

fn default_attached() -> bool {
    true
}
