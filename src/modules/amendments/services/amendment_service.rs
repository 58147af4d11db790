// AmendmentService
// Proposal, review and application of contract amendments

use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::{AppError, Currency, Result};
use crate::modules::amendments::{
    models::{amendment_number, ContractAmendment, CreateAmendmentRequest},
    repositories::AmendmentRepository,
};
use crate::modules::contracts::{ContractRepository, ContractService};
use crate::modules::vehicles::VehicleRepository;

pub struct AmendmentService {
    repository: AmendmentRepository,
    contract_repository: ContractRepository,
    contracts: ContractService,
    vehicles: VehicleRepository,
    pool: MySqlPool,
}

impl AmendmentService {
    pub fn new(pool: MySqlPool, default_currency: Currency) -> Self {
        Self {
            repository: AmendmentRepository::new(pool.clone()),
            contract_repository: ContractRepository::new(pool.clone()),
            contracts: ContractService::new(pool.clone(), default_currency),
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    /// Propose a change to an active contract
    pub async fn create(
        &self,
        contract_id: &str,
        request: CreateAmendmentRequest,
        requested_by: Option<String>,
    ) -> Result<ContractAmendment> {
        let contract = self.contracts.get_contract(contract_id).await?;
        let sequence = self.repository.count_by_contract(contract_id).await? + 1;

        let amendment = ContractAmendment::propose(
            &contract,
            request,
            amendment_number(&contract.contract_number, sequence),
            requested_by,
        )?;

        if let Some(ref vehicle_id) = amendment.new_values.vehicle_id {
            if self.vehicles.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Vehicle {} does not exist",
                    vehicle_id
                )));
            }
        }

        self.repository.create(&amendment).await?;

        info!(
            amendment_id = amendment.id.as_str(),
            amendment_number = amendment.amendment_number.as_str(),
            contract_id,
            amendment_type = amendment.amendment_type.as_str(),
            "Amendment proposed"
        );

        Ok(amendment)
    }

    pub async fn get(&self, id: &str) -> Result<ContractAmendment> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Amendment {} not found", id)))
    }

    pub async fn list(&self, contract_id: &str) -> Result<Vec<ContractAmendment>> {
        // 404 for unknown contracts rather than an empty list
        self.contracts.get_contract(contract_id).await?;
        self.repository.list_by_contract(contract_id).await
    }

    pub async fn approve(
        &self,
        id: &str,
        reviewer: &str,
        notes: Option<String>,
    ) -> Result<ContractAmendment> {
        let amendment = self
            .transition(id, |amendment| amendment.approve(reviewer, notes))
            .await?;

        info!(amendment_id = id, reviewer, "Amendment approved");
        Ok(amendment)
    }

    pub async fn reject(&self, id: &str, reviewer: &str, reason: &str) -> Result<ContractAmendment> {
        let amendment = self
            .transition(id, |amendment| amendment.reject(reviewer, reason))
            .await?;

        info!(amendment_id = id, reviewer, "Amendment rejected");
        Ok(amendment)
    }

    pub async fn cancel(&self, id: &str, actor: &str, reason: &str) -> Result<ContractAmendment> {
        let amendment = self
            .transition(id, |amendment| amendment.cancel(actor, reason))
            .await?;

        info!(amendment_id = id, actor, "Amendment cancelled");
        Ok(amendment)
    }

    pub async fn record_customer_signature(&self, id: &str) -> Result<ContractAmendment> {
        let amendment = self
            .transition(id, ContractAmendment::record_customer_signature)
            .await?;

        info!(amendment_id = id, "Customer signature recorded");
        Ok(amendment)
    }

    /// Run one workflow step against the locked amendment row.
    ///
    /// Concurrent steps on the same amendment are serialized, so each one
    /// validates against the state the previous one committed.
    async fn transition<F>(&self, id: &str, change: F) -> Result<ContractAmendment>
    where
        F: FnOnce(&mut ContractAmendment) -> Result<()>,
    {
        let mut tx = self.pool.begin().await?;

        let mut amendment = self
            .repository
            .find_for_update_with_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Amendment {} not found", id)))?;

        if let Err(e) = change(&mut amendment) {
            tx.rollback().await?;
            return Err(e);
        }

        self.repository
            .update_workflow_with_tx(&mut tx, &amendment)
            .await?;
        tx.commit().await?;

        Ok(amendment)
    }

    /// Write an approved amendment onto its contract.
    ///
    /// Both rows are locked and updated in one transaction; any failure
    /// leaves the contract and the amendment untouched.
    pub async fn apply(&self, id: &str) -> Result<ContractAmendment> {
        let mut tx = self.pool.begin().await?;

        let mut amendment = self
            .repository
            .find_for_update_with_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Amendment {} not found", id)))?;

        let mut contract = self
            .contract_repository
            .find_for_update_with_tx(&mut tx, &amendment.contract_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Contract {} not found", amendment.contract_id))
            })?;

        if let Err(e) = amendment.apply(&mut contract) {
            warn!(amendment_id = id, error = %e, "Amendment could not be applied");
            tx.rollback().await?;
            return Err(e);
        }

        self.contract_repository
            .update_terms_with_tx(&mut tx, &contract)
            .await?;
        self.repository
            .update_workflow_with_tx(&mut tx, &amendment)
            .await?;

        tx.commit().await?;

        info!(
            amendment_id = id,
            contract_id = contract.id.as_str(),
            end_date = %contract.end_date,
            monthly_amount = %contract.monthly_amount,
            contract_amount = %contract.contract_amount,
            "Amendment applied"
        );

        Ok(amendment)
    }
}
