use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::legal::models::LegalDocumentRecord;

const DOCUMENT_COLUMNS: &str =
    "id, contract_id, kind, reference_number, storage_path, content_sha256, created_at";

pub struct LegalDocumentRepository {
    pool: MySqlPool,
}

impl LegalDocumentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &LegalDocumentRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO legal_documents (
                id, contract_id, kind, reference_number, storage_path, content_sha256, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.contract_id)
        .bind(record.kind.as_str())
        .bind(&record.reference_number)
        .bind(&record.storage_path)
        .bind(&record.content_sha256)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<LegalDocumentRecord>> {
        let query = format!("SELECT {} FROM legal_documents WHERE id = ?", DOCUMENT_COLUMNS);
        let record = sqlx::query_as::<_, LegalDocumentRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Documents generated for a contract, newest first
    pub async fn list_by_contract(&self, contract_id: &str) -> Result<Vec<LegalDocumentRecord>> {
        let query = format!(
            "SELECT {} FROM legal_documents WHERE contract_id = ? ORDER BY created_at DESC",
            DOCUMENT_COLUMNS
        );
        let records = sqlx::query_as::<_, LegalDocumentRecord>(&query)
            .bind(contract_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}
