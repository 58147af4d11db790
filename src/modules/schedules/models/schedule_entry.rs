use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status of a derived installment relative to payments and today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleEntryStatus {
    /// Covered by the cumulative amount paid
    Paid,
    /// Unpaid and the due date has passed
    Overdue,
    /// Unpaid and due today
    Pending,
    /// Unpaid and due in the future
    Upcoming,
}

impl ScheduleEntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Pending => "pending",
            Self::Upcoming => "upcoming",
        }
    }
}

impl std::fmt::Display for ScheduleEntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One expected monthly installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// Sequential number (1, 2, 3...)
    pub installment_number: u32,
    pub due_date: NaiveDate,
    /// Always the contract's monthly amount
    pub amount: Decimal,
    pub status: ScheduleEntryStatus,
}

/// Contract figures a schedule is derived from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub start_date: NaiveDate,
    pub monthly_amount: Decimal,
    /// Total contract amount
    pub contract_amount: Decimal,
    #[serde(default)]
    pub total_paid: Decimal,
}

/// Aggregate view over a schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub installment_count: u32,
    /// Fully paid installments, capped at the installment count
    pub paid_count: u32,
    pub overdue_count: u32,
    pub overdue_amount: Decimal,
    pub scheduled_total: Decimal,
    /// Contract amount minus total paid, never negative
    pub remaining_balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<PaymentScheduleEntry>,
}
