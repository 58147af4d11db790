use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::schedules::models::{
    PaymentScheduleEntry, ScheduleEntryStatus, ScheduleInput, ScheduleSummary,
};

/// Upper bound on derived installments. Larger counts come from a monthly
/// amount entered in the wrong unit.
pub const MAX_INSTALLMENTS: u32 = 600;

/// Derives monthly installment schedules from contract figures
pub struct PaymentScheduleGenerator;

impl PaymentScheduleGenerator {
    /// Number of installments: `ceil(contract_amount / monthly_amount)`.
    ///
    /// Non-positive amounts yield zero installments.
    pub fn installment_count(contract_amount: Decimal, monthly_amount: Decimal) -> Result<u32> {
        if monthly_amount <= Decimal::ZERO || contract_amount <= Decimal::ZERO {
            return Ok(0);
        }

        let count = contract_amount
            .checked_div(monthly_amount)
            .map(|ratio| ratio.ceil())
            .and_then(|count| count.to_u32());
        match count {
            Some(n) if n <= MAX_INSTALLMENTS => Ok(n),
            _ => Err(AppError::validation(format!(
                "Contract amount {} at {} per month exceeds {} installments",
                contract_amount, monthly_amount, MAX_INSTALLMENTS
            ))),
        }
    }

    /// Number of fully paid installments: `floor(total_paid / monthly_amount)`
    pub fn paid_count(total_paid: Decimal, monthly_amount: Decimal) -> u32 {
        if monthly_amount <= Decimal::ZERO || total_paid <= Decimal::ZERO {
            return 0;
        }

        total_paid
            .checked_div(monthly_amount)
            .and_then(|ratio| ratio.floor().to_u32())
            .unwrap_or(u32::MAX)
    }

    /// First due date: day 1 of the month after the contract start
    pub fn first_due_date(start_date: NaiveDate) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(start_date.year(), start_date.month(), 1)
            .and_then(|first_of_month| first_of_month.checked_add_months(Months::new(1)))
            .ok_or_else(|| {
                AppError::validation(format!("Start date {} is out of range", start_date))
            })
    }

    /// Generate the schedule as seen on `today`
    pub fn generate(input: &ScheduleInput, today: NaiveDate) -> Result<Vec<PaymentScheduleEntry>> {
        if input.total_paid < Decimal::ZERO {
            return Err(AppError::validation("Total paid cannot be negative"));
        }

        let count = Self::installment_count(input.contract_amount, input.monthly_amount)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        if input.monthly_amount.checked_mul(Decimal::from(count)).is_none() {
            return Err(AppError::validation(format!(
                "Scheduled total of {} installments of {} is out of range",
                count, input.monthly_amount
            )));
        }

        let paid_count = Self::paid_count(input.total_paid, input.monthly_amount);
        let first_due = Self::first_due_date(input.start_date)?;

        let mut schedule = Vec::with_capacity(count as usize);
        for index in 0..count {
            let due_date = first_due
                .checked_add_months(Months::new(index))
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "Installment {} due date is out of range",
                        index + 1
                    ))
                })?;

            schedule.push(PaymentScheduleEntry {
                installment_number: index + 1,
                due_date,
                amount: input.monthly_amount,
                status: Self::classify(index, paid_count, due_date, today),
            });
        }

        Ok(schedule)
    }

    /// Status of the installment at zero-based `index`
    pub fn classify(
        index: u32,
        paid_count: u32,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> ScheduleEntryStatus {
        if index < paid_count {
            ScheduleEntryStatus::Paid
        } else if due_date < today {
            ScheduleEntryStatus::Overdue
        } else if due_date == today {
            ScheduleEntryStatus::Pending
        } else {
            ScheduleEntryStatus::Upcoming
        }
    }

    pub fn summarize(schedule: &[PaymentScheduleEntry], input: &ScheduleInput) -> ScheduleSummary {
        let overdue: Vec<_> = schedule
            .iter()
            .filter(|e| e.status == ScheduleEntryStatus::Overdue)
            .collect();

        let remaining = input
            .contract_amount
            .checked_sub(input.total_paid)
            .unwrap_or(Decimal::ZERO);

        ScheduleSummary {
            installment_count: schedule.len() as u32,
            paid_count: schedule
                .iter()
                .filter(|e| e.status == ScheduleEntryStatus::Paid)
                .count() as u32,
            overdue_count: overdue.len() as u32,
            overdue_amount: overdue.iter().map(|e| e.amount).sum(),
            scheduled_total: schedule.iter().map(|e| e.amount).sum(),
            remaining_balance: remaining.max(Decimal::ZERO),
            next_due: schedule
                .iter()
                .find(|e| e.status != ScheduleEntryStatus::Paid)
                .cloned(),
        }
    }
}
