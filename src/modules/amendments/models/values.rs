use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::contracts::ContractTerms;

/// Sparse snapshot of amendable contract fields.
///
/// Stored twice per amendment (original and new); only changed fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmendmentValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
}

fn changed<T: PartialEq + Clone>(current: &T, proposed: &Option<T>) -> Option<T> {
    proposed.as_ref().filter(|p| *p != current).cloned()
}

impl AmendmentValues {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Compare proposed values with the contract's current terms.
    ///
    /// Returns `(original, new)` holding only the fields that change.
    pub fn diff(current: &ContractTerms, proposed: &AmendmentValues) -> (Self, Self) {
        let new = Self {
            start_date: changed(&current.start_date, &proposed.start_date),
            end_date: changed(&current.end_date, &proposed.end_date),
            monthly_amount: changed(&current.monthly_amount, &proposed.monthly_amount),
            contract_amount: changed(&current.contract_amount, &proposed.contract_amount),
            vehicle_id: proposed
                .vehicle_id
                .as_ref()
                .filter(|v| current.vehicle_id.as_ref() != Some(*v))
                .cloned(),
            terms: proposed
                .terms
                .as_ref()
                .filter(|t| current.terms.as_ref() != Some(*t))
                .cloned(),
        };

        let original = Self {
            start_date: new.start_date.map(|_| current.start_date),
            end_date: new.end_date.map(|_| current.end_date),
            monthly_amount: new.monthly_amount.map(|_| current.monthly_amount),
            contract_amount: new.contract_amount.map(|_| current.contract_amount),
            vehicle_id: new.vehicle_id.as_ref().and(current.vehicle_id.clone()),
            terms: new.terms.as_ref().and(current.terms.clone()),
        };

        (original, new)
    }

    /// Overlay the set fields onto `terms`
    pub fn apply_to(&self, mut terms: ContractTerms) -> ContractTerms {
        if let Some(start_date) = self.start_date {
            terms.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            terms.end_date = end_date;
        }
        if let Some(monthly_amount) = self.monthly_amount {
            terms.monthly_amount = monthly_amount;
        }
        if let Some(contract_amount) = self.contract_amount {
            terms.contract_amount = contract_amount;
        }
        if let Some(ref vehicle_id) = self.vehicle_id {
            terms.vehicle_id = Some(vehicle_id.clone());
        }
        if let Some(ref text) = self.terms {
            terms.terms = Some(text.clone());
        }
        terms
    }
}
