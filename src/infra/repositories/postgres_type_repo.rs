use crate::domain::{models::appointment_type::AppointmentType, ports::AppointmentTypeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTypeRepo {
    pool: PgPool,
}

impl PostgresTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentTypeRepository for PostgresTypeRepo {
    async fn create(&self, appointment_type: &AppointmentType) -> Result<AppointmentType, AppError> {
        sqlx::query_as::<_, AppointmentType>(
            "INSERT INTO appointment_types (id, business_id, name, duration_min, price_cents, location, color, active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&appointment_type.id).bind(&appointment_type.business_id).bind(&appointment_type.name)
            .bind(appointment_type.duration_min).bind(appointment_type.price_cents).bind(&appointment_type.location)
            .bind(&appointment_type.color).bind(appointment_type.active).bind(appointment_type.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, business_id: &str, id: &str) -> Result<Option<AppointmentType>, AppError> {
        sqlx::query_as::<_, AppointmentType>("SELECT * FROM appointment_types WHERE business_id = $1 AND id = $2").bind(business_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_active(&self, business_id: &str, id: &str) -> Result<Option<AppointmentType>, AppError> {
        sqlx::query_as::<_, AppointmentType>("SELECT * FROM appointment_types WHERE business_id = $1 AND id = $2 AND active = TRUE").bind(business_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, business_id: &str, include_inactive: bool) -> Result<Vec<AppointmentType>, AppError> {
        let query = if include_inactive {
            "SELECT * FROM appointment_types WHERE business_id = $1 ORDER BY created_at ASC"
        } else {
            "SELECT * FROM appointment_types WHERE business_id = $1 AND active = TRUE ORDER BY created_at ASC"
        };
        sqlx::query_as::<_, AppointmentType>(query).bind(business_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, appointment_type: &AppointmentType) -> Result<AppointmentType, AppError> {
        sqlx::query_as::<_, AppointmentType>(
            "UPDATE appointment_types SET name=$1, duration_min=$2, price_cents=$3, location=$4, color=$5, active=$6
             WHERE id=$7 AND business_id=$8
             RETURNING *"
        )
            .bind(&appointment_type.name).bind(appointment_type.duration_min).bind(appointment_type.price_cents)
            .bind(&appointment_type.location).bind(&appointment_type.color).bind(appointment_type.active)
            .bind(&appointment_type.id).bind(&appointment_type.business_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn deactivate(&self, business_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE appointment_types SET active = FALSE WHERE id = $1 AND business_id = $2").bind(id).bind(business_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Appointment type not found".into())); }
        Ok(())
    }
}
