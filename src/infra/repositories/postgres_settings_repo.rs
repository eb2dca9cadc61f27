use crate::domain::{models::business::BusinessSettings, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepo {
    async fn get(&self, business_id: &str) -> Result<Option<BusinessSettings>, AppError> {
        sqlx::query_as::<_, BusinessSettings>("SELECT * FROM business_settings WHERE business_id = $1").bind(business_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn upsert(&self, settings: &BusinessSettings) -> Result<BusinessSettings, AppError> {
        sqlx::query_as::<_, BusinessSettings>(
            "INSERT INTO business_settings (business_id, business_name, owner_email, timezone, open_time, close_time, week_hours_json, notify_owner, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT(business_id) DO UPDATE SET
                business_name=excluded.business_name, owner_email=excluded.owner_email, timezone=excluded.timezone,
                open_time=excluded.open_time, close_time=excluded.close_time, week_hours_json=excluded.week_hours_json,
                notify_owner=excluded.notify_owner, updated_at=excluded.updated_at
             RETURNING *"
        )
            .bind(&settings.business_id).bind(&settings.business_name).bind(&settings.owner_email)
            .bind(&settings.timezone).bind(&settings.open_time).bind(&settings.close_time)
            .bind(&settings.week_hours_json).bind(settings.notify_owner).bind(settings.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
