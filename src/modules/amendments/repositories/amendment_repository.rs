// AmendmentRepository
// MySQL persistence for contract amendments
//
// original_values / new_values are JSON columns

use sqlx::{types::Json, MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::amendments::models::ContractAmendment;

const AMENDMENT_COLUMNS: &str = r#"
    id, contract_id, amendment_number, amendment_type, reason,
    original_values, new_values, status, requires_customer_signature,
    customer_signed_at, requested_by, reviewed_by, reviewed_at, review_notes,
    applied_at, created_at, updated_at
"#;

pub struct AmendmentRepository {
    pool: MySqlPool,
}

impl AmendmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, amendment: &ContractAmendment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contract_amendments (
                id, contract_id, amendment_number, amendment_type, reason,
                original_values, new_values, status, requires_customer_signature,
                customer_signed_at, requested_by, reviewed_by, reviewed_at, review_notes,
                applied_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&amendment.id)
        .bind(&amendment.contract_id)
        .bind(&amendment.amendment_number)
        .bind(amendment.amendment_type.as_str())
        .bind(&amendment.reason)
        .bind(Json(&amendment.original_values))
        .bind(Json(&amendment.new_values))
        .bind(amendment.status.as_str())
        .bind(amendment.requires_customer_signature)
        .bind(amendment.customer_signed_at)
        .bind(&amendment.requested_by)
        .bind(&amendment.reviewed_by)
        .bind(amendment.reviewed_at)
        .bind(&amendment.review_notes)
        .bind(amendment.applied_at)
        .bind(amendment.created_at)
        .bind(amendment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Amendment number '{}' is already taken, retry the request",
                        amendment.amendment_number
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<ContractAmendment>> {
        let query = format!(
            "SELECT {} FROM contract_amendments WHERE id = ?",
            AMENDMENT_COLUMNS
        );
        let amendment = sqlx::query_as::<_, ContractAmendment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(amendment)
    }

    /// All amendments of a contract, newest first
    pub async fn list_by_contract(&self, contract_id: &str) -> Result<Vec<ContractAmendment>> {
        let query = format!(
            "SELECT {} FROM contract_amendments WHERE contract_id = ? ORDER BY created_at DESC",
            AMENDMENT_COLUMNS
        );
        let amendments = sqlx::query_as::<_, ContractAmendment>(&query)
            .bind(contract_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(amendments)
    }

    pub async fn count_by_contract(&self, contract_id: &str) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contract_amendments WHERE contract_id = ?")
                .bind(contract_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    pub async fn find_for_update_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: &str,
    ) -> Result<Option<ContractAmendment>> {
        let query = format!(
            "SELECT {} FROM contract_amendments WHERE id = ? FOR UPDATE",
            AMENDMENT_COLUMNS
        );
        let amendment = sqlx::query_as::<_, ContractAmendment>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(amendment)
    }

    /// Persist workflow fields (status, review, signature, applied_at).
    /// The row must have been read with `find_for_update_with_tx` in `tx`.
    pub async fn update_workflow_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        amendment: &ContractAmendment,
    ) -> Result<()> {
        let result = sqlx::query(UPDATE_WORKFLOW)
            .bind(amendment.status.as_str())
            .bind(amendment.customer_signed_at)
            .bind(&amendment.reviewed_by)
            .bind(amendment.reviewed_at)
            .bind(&amendment.review_notes)
            .bind(amendment.applied_at)
            .bind(amendment.updated_at)
            .bind(&amendment.id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Amendment {} not found",
                amendment.id
            )));
        }

        Ok(())
    }
}

const UPDATE_WORKFLOW: &str = r#"
    UPDATE contract_amendments
    SET status = ?, customer_signed_at = ?, reviewed_by = ?, reviewed_at = ?,
        review_notes = ?, applied_at = ?, updated_at = ?
    WHERE id = ?
"#;
