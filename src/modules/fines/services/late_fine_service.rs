use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{Currency, Result};
use crate::modules::contracts::ContractService;
use crate::modules::fines::{
    models::{LateFineAssessment, LateFineInput, LateFineSettings, SaveFineSettingsRequest},
    repositories::LateFineSettingsRepository,
    services::LateFineCalculator,
};

/// Late fine settings management and per-contract assessment
pub struct LateFineService {
    repository: LateFineSettingsRepository,
    contracts: ContractService,
}

impl LateFineService {
    pub fn new(pool: MySqlPool, default_currency: Currency) -> Self {
        Self {
            repository: LateFineSettingsRepository::new(pool.clone()),
            contracts: ContractService::new(pool, default_currency),
        }
    }

    /// Stored settings, or the built-in fallback when none were saved
    pub async fn current_settings(&self) -> Result<LateFineSettings> {
        Ok(self
            .repository
            .find_current()
            .await?
            .unwrap_or_else(LateFineSettings::fallback))
    }

    pub async fn update_settings(&self, request: SaveFineSettingsRequest) -> Result<LateFineSettings> {
        let settings = LateFineSettings::new(request)?;
        self.repository.save(&settings).await?;

        info!(
            settings_id = settings.id.as_str(),
            fine_type = settings.fine_type.as_str(),
            rate = %settings.rate,
            grace_period_days = settings.grace_period_days,
            is_active = settings.is_active,
            "Late fine settings updated"
        );

        Ok(settings)
    }

    /// Fine owed on a contract as of `today`
    pub async fn assess_contract(
        &self,
        contract_id: &str,
        today: NaiveDate,
    ) -> Result<LateFineAssessment> {
        let contract = self.contracts.get_contract(contract_id).await?;
        let settings = self.current_settings().await?;

        let input = LateFineInput {
            contract_amount: contract.contract_amount,
            end_date: contract.end_date,
        };

        LateFineCalculator::calculate(&input, &settings, contract.currency, today)
    }
}
