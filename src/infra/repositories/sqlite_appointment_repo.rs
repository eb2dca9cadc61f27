use crate::domain::{models::appointment::Appointment, ports::AppointmentRepository};
use crate::domain::services::overlap;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteAppointmentRepo {
    pool: SqlitePool,
}

impl SqliteAppointmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepo {
    async fn list_for_day(&self, business_id: &str, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE business_id = ? AND date = ? ORDER BY time ASC").bind(business_id).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE business_id = ? ORDER BY date ASC, time ASC").bind(business_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, business_id: &str, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE business_id = ? AND id = ?").bind(business_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn create_serialized(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        // The pool holds a single connection, so this transaction cannot
        // interleave with another writer; the overlap re-check and the insert
        // are one serialized unit.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE business_id = ? AND date = ? ORDER BY time ASC"
        )
            .bind(&appointment.business_id).bind(appointment.date)
            .fetch_all(&mut *tx).await.map_err(AppError::Database)?;

        overlap::ensure_free(&existing, appointment.start_min(), appointment.duration_min, None)?;

        let created = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, business_id, type_id, title, client_name, client_email, date, time, duration_min, location, notes, status, source, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&appointment.id).bind(&appointment.business_id).bind(&appointment.type_id).bind(&appointment.title)
            .bind(&appointment.client_name).bind(&appointment.client_email).bind(appointment.date).bind(&appointment.time)
            .bind(appointment.duration_min).bind(&appointment.location).bind(&appointment.notes).bind(&appointment.status)
            .bind(&appointment.source).bind(appointment.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }
    async fn update_serialized(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE business_id = ? AND date = ? ORDER BY time ASC"
        )
            .bind(&appointment.business_id).bind(appointment.date)
            .fetch_all(&mut *tx).await.map_err(AppError::Database)?;

        overlap::ensure_free(&existing, appointment.start_min(), appointment.duration_min, Some(&appointment.id))?;

        let updated = sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET type_id=?, title=?, client_name=?, client_email=?, date=?, time=?, duration_min=?, location=?, notes=?
             WHERE id=? AND business_id=?
             RETURNING *"
        )
            .bind(&appointment.type_id).bind(&appointment.title).bind(&appointment.client_name).bind(&appointment.client_email)
            .bind(appointment.date).bind(&appointment.time).bind(appointment.duration_min).bind(&appointment.location)
            .bind(&appointment.notes).bind(&appointment.id).bind(&appointment.business_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Appointment not found".into()))?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }
    async fn set_status(&self, business_id: &str, id: &str, status: &str) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>("UPDATE appointments SET status = ? WHERE id = ? AND business_id = ? RETURNING *").bind(status).bind(id).bind(business_id).fetch_optional(&self.pool).await.map_err(AppError::Database)?.ok_or_else(|| AppError::NotFound("Appointment not found".into()))
    }
    async fn delete(&self, business_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ? AND business_id = ?").bind(id).bind(business_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Appointment not found".into())); }
        Ok(())
    }
}
