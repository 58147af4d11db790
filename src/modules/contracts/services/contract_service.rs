// ContractService
// Business logic for rental contracts

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::{AppError, Currency, Result};
use crate::modules::contracts::{
    models::{Contract, ContractStatus, ContractSummary, CreateContractRequest},
    repositories::ContractRepository,
};
use crate::modules::customers::CustomerRepository;
use crate::modules::vehicles::VehicleRepository;

/// Service for contract business logic
pub struct ContractService {
    repository: ContractRepository,
    customers: CustomerRepository,
    vehicles: VehicleRepository,
    default_currency: Currency,
}

impl ContractService {
    pub fn new(pool: MySqlPool, default_currency: Currency) -> Self {
        Self {
            repository: ContractRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            default_currency,
        }
    }

    /// Create a draft contract for an existing customer and vehicle
    pub async fn create_contract(&self, request: CreateContractRequest) -> Result<Contract> {
        let contract = Contract::new(request, self.default_currency)?;

        if self.customers.find_by_id(&contract.customer_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Customer {} does not exist",
                contract.customer_id
            )));
        }

        if let Some(ref vehicle_id) = contract.vehicle_id {
            if self.vehicles.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Vehicle {} does not exist",
                    vehicle_id
                )));
            }
        }

        self.repository.create(&contract).await?;

        info!(
            contract_id = contract.id.as_str(),
            contract_number = contract.contract_number.as_str(),
            monthly_amount = %contract.monthly_amount,
            contract_amount = %contract.contract_amount,
            "Contract created"
        );

        Ok(contract)
    }

    pub async fn get_contract(&self, id: &str) -> Result<Contract> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Contract {} not found", id)))
    }

    pub async fn list_contracts(
        &self,
        status: Option<ContractStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Contract>> {
        self.repository.list(status, limit, offset).await
    }

    pub async fn change_status(&self, id: &str, status: ContractStatus) -> Result<Contract> {
        let mut contract = self.get_contract(id).await?;
        let previous = contract.status;

        contract.change_status(status)?;
        self.repository.update_status(&contract).await?;

        info!(
            contract_id = id,
            from = previous.as_str(),
            to = status.as_str(),
            "Contract status changed"
        );

        Ok(contract)
    }

    /// Record a received payment against the contract total
    pub async fn record_payment(&self, id: &str, amount: Decimal) -> Result<Contract> {
        let mut contract = self.get_contract(id).await?;
        contract.record_payment(amount)?;

        self.repository.add_payment(id, amount).await?;

        if contract.total_paid > contract.contract_amount {
            warn!(
                contract_id = id,
                total_paid = %contract.total_paid,
                contract_amount = %contract.contract_amount,
                "Contract is overpaid"
            );
        }

        info!(contract_id = id, amount = %amount, "Payment recorded");

        self.get_contract(id).await
    }

    pub async fn summary(&self, id: &str, today: NaiveDate) -> Result<ContractSummary> {
        self.get_contract(id).await?.summary(today)
    }
}
