use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::fines::models::LateFineSettings;

/// Late fine settings are append-only; the newest row is in effect
pub struct LateFineSettingsRepository {
    pool: MySqlPool,
}

impl LateFineSettingsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn find_current(&self) -> Result<Option<LateFineSettings>> {
        let settings = sqlx::query_as::<_, LateFineSettings>(
            r#"
            SELECT id, fine_type, rate, grace_period_days, max_fine_amount, is_active,
                   created_at, updated_at
            FROM late_fine_settings
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    pub async fn save(&self, settings: &LateFineSettings) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO late_fine_settings (
                id, fine_type, rate, grace_period_days, max_fine_amount, is_active,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&settings.id)
        .bind(settings.fine_type.as_str())
        .bind(settings.rate)
        .bind(settings.grace_period_days)
        .bind(settings.max_fine_amount)
        .bind(settings.is_active)
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
