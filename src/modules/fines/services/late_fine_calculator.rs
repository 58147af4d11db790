use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{AppError, Currency, Result};
use crate::modules::fines::models::{FineType, LateFineAssessment, LateFineInput, LateFineSettings};

/// Pure late fine arithmetic
///
/// ```text
/// days_overdue   = today - end_date
/// effective_days = max(0, days_overdue - grace_period_days)
/// fine           = rate% * contract_amount * effective_days   (percentage)
///                = rate * effective_days                      (fixed daily)
/// fine           = min(fine, cap)                             (cap > 0)
/// ```
pub struct LateFineCalculator;

impl LateFineCalculator {
    pub fn calculate(
        input: &LateFineInput,
        settings: &LateFineSettings,
        currency: Currency,
        today: NaiveDate,
    ) -> Result<LateFineAssessment> {
        if input.contract_amount < Decimal::ZERO {
            return Err(AppError::validation("Contract amount cannot be negative"));
        }
        if settings.grace_period_days < 0 {
            return Err(AppError::validation("Grace period cannot be negative"));
        }

        let days_overdue = (today - input.end_date).num_days();
        let effective_days = Self::effective_days(days_overdue, settings.grace_period_days);

        let (fine_amount, capped) = if settings.is_active && effective_days > 0 {
            match (
                Self::raw_fine(input.contract_amount, settings, effective_days),
                settings.effective_cap(),
            ) {
                (Some(raw), cap) => Self::apply_cap(currency.round(raw), cap),
                // Past the representable range any positive cap is reached
                (None, Some(max)) => (max, true),
                (None, None) => {
                    return Err(AppError::validation(format!(
                        "Late fine on {} over {} days is out of range",
                        input.contract_amount, effective_days
                    )))
                }
            }
        } else {
            (Decimal::ZERO, false)
        };

        let total_due = input
            .contract_amount
            .checked_add(fine_amount)
            .ok_or_else(|| AppError::validation("Total due is out of range"))?;

        Ok(LateFineAssessment {
            as_of: today,
            days_overdue,
            grace_period_days: settings.grace_period_days,
            effective_days,
            fine_type: settings.fine_type,
            rate: settings.rate,
            fine_amount,
            capped,
            contract_amount: input.contract_amount,
            total_due,
        })
    }

    /// Overdue days past the grace period, never negative
    pub fn effective_days(days_overdue: i64, grace_period_days: i32) -> i64 {
        (days_overdue - i64::from(grace_period_days)).max(0)
    }

    /// Uncapped fine, `None` on overflow
    fn raw_fine(contract_amount: Decimal, settings: &LateFineSettings, days: i64) -> Option<Decimal> {
        let days = Decimal::from(days);
        match settings.fine_type {
            FineType::Percentage => settings
                .rate
                .checked_div(Decimal::ONE_HUNDRED)?
                .checked_mul(contract_amount)?
                .checked_mul(days),
            FineType::FixedDaily => settings.rate.checked_mul(days),
        }
    }

    fn apply_cap(fine: Decimal, cap: Option<Decimal>) -> (Decimal, bool) {
        match cap {
            Some(max) if fine > max => (max, true),
            _ => (fine, false),
        }
    }
}
