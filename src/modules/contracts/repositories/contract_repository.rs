// ContractRepository
// MySQL persistence for rental contracts
//
// Implements:
// - Create contract (unique contract_number)
// - Read by ID, list with optional status filter
// - Status updates
// - Atomic payment accumulation
// - Row-locked reads and term updates inside a caller transaction (amendments)

use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::contracts::models::{Contract, ContractStatus};

const CONTRACT_COLUMNS: &str = r#"
    id, contract_number, customer_id, vehicle_id, start_date, end_date,
    monthly_amount, contract_amount, total_paid, currency, status, terms,
    created_at, updated_at
"#;

/// Repository for contract database operations
pub struct ContractRepository {
    pool: MySqlPool,
}

impl ContractRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, contract: &Contract) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, contract_number, customer_id, vehicle_id, start_date, end_date,
                monthly_amount, contract_amount, total_paid, currency, status, terms,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&contract.id)
        .bind(&contract.contract_number)
        .bind(&contract.customer_id)
        .bind(&contract.vehicle_id)
        .bind(contract.start_date)
        .bind(contract.end_date)
        .bind(contract.monthly_amount)
        .bind(contract.contract_amount)
        .bind(contract.total_paid)
        .bind(contract.currency.to_string())
        .bind(contract.status.as_str())
        .bind(&contract.terms)
        .bind(contract.created_at)
        .bind(contract.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Contract with number '{}' already exists",
                        contract.contract_number
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Contract>> {
        let query = format!("SELECT {} FROM contracts WHERE id = ?", CONTRACT_COLUMNS);
        let contract = sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contract)
    }

    /// List contracts, newest first
    pub async fn list(
        &self,
        status: Option<ContractStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Contract>> {
        let contracts = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM contracts WHERE status = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    CONTRACT_COLUMNS
                );
                sqlx::query_as::<_, Contract>(&query)
                    .bind(status.as_str())
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {} FROM contracts ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    CONTRACT_COLUMNS
                );
                sqlx::query_as::<_, Contract>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(contracts)
    }

    pub async fn update_status(&self, contract: &Contract) -> Result<()> {
        let result = sqlx::query("UPDATE contracts SET status = ?, updated_at = ? WHERE id = ?")
            .bind(contract.status.as_str())
            .bind(contract.updated_at)
            .bind(&contract.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Contract {} not found",
                contract.id
            )));
        }

        Ok(())
    }

    /// Add `amount` to total_paid in a single statement
    pub async fn add_payment(&self, id: &str, amount: Decimal) -> Result<()> {
        let result = sqlx::query(
            "UPDATE contracts SET total_paid = total_paid + ?, updated_at = UTC_TIMESTAMP() WHERE id = ?",
        )
        .bind(amount)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Contract {} not found", id)));
        }

        Ok(())
    }

    /// Read and lock a contract row for the rest of the transaction
    pub async fn find_for_update_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: &str,
    ) -> Result<Option<Contract>> {
        let query = format!(
            "SELECT {} FROM contracts WHERE id = ? FOR UPDATE",
            CONTRACT_COLUMNS
        );
        let contract = sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(contract)
    }

    /// Persist the amendable fields within a transaction
    pub async fn update_terms_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        contract: &Contract,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE contracts
            SET start_date = ?, end_date = ?, monthly_amount = ?, contract_amount = ?,
                vehicle_id = ?, terms = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(contract.start_date)
        .bind(contract.end_date)
        .bind(contract.monthly_amount)
        .bind(contract.contract_amount)
        .bind(&contract.vehicle_id)
        .bind(&contract.terms)
        .bind(contract.updated_at)
        .bind(&contract.id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
