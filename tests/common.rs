use bookline::{
    api::router::create_router,
    config::Config,
    domain::models::appointment::Appointment,
    domain::models::notification::NotifyReceipt,
    domain::ports::Notifier,
    domain::services::scheduler::Scheduler,
    error::AppError,
    infra::repositories::{
        sqlite_appointment_repo::SqliteAppointmentRepo,
        sqlite_business_repo::SqliteBusinessRepo,
        sqlite_settings_repo::SqliteSettingsRepo,
        sqlite_type_repo::SqliteTypeRepo,
    },
    state::AppState,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// Records every dispatch instead of talking to a delivery service.
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        recipient: &str,
        kind: &str,
        _appointment: &Appointment,
    ) -> Result<NotifyReceipt, AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), kind.to_string()));
        Ok(NotifyReceipt {
            ok: true,
            provider: "mock".to_string(),
        })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        // Single connection, matching production SQLite setup: write
        // transactions cannot interleave.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
        };

        let notifier = Arc::new(RecordingNotifier {
            sent: Mutex::new(Vec::new()),
        });

        let business_repo = Arc::new(SqliteBusinessRepo::new(pool.clone()));
        let settings_repo = Arc::new(SqliteSettingsRepo::new(pool.clone()));
        let type_repo = Arc::new(SqliteTypeRepo::new(pool.clone()));
        let appointment_repo = Arc::new(SqliteAppointmentRepo::new(pool.clone()));

        let scheduler = Arc::new(Scheduler::new(
            appointment_repo.clone(),
            type_repo.clone(),
            settings_repo.clone(),
            notifier.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            business_repo,
            settings_repo,
            type_repo,
            appointment_repo,
            notifier: notifier.clone(),
            scheduler,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            notifier,
        }
    }

    /// Creates a business and returns `(id, slug)`.
    #[allow(dead_code)]
    pub async fn create_business(&self, name: &str) -> (String, String) {
        let res = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/businesses")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({"name": name, "owner_email": "owner@example.com"})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            res.status().is_success(),
            "business creation failed: {}",
            res.status()
        );

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (
            body["id"].as_str().unwrap().to_string(),
            body["slug"].as_str().unwrap().to_string(),
        )
    }

    /// Creates an appointment type and returns its id.
    #[allow(dead_code)]
    pub async fn create_type(&self, business_id: &str, name: &str, duration_min: i32) -> String {
        let payload = serde_json::json!({
            "name": name,
            "duration_min": duration_min,
            "location": "OFFICE"
        });

        let res = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/{}/types", business_id))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            res.status().is_success(),
            "type creation failed: {}",
            res.status()
        );

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    /// Sets the business-wide window to 09:00-18:00 with Sunday closed.
    #[allow(dead_code)]
    pub async fn set_standard_hours(&self, business_id: &str) {
        let payload = serde_json::json!({
            "open_time": "09:00",
            "close_time": "18:00",
            "week_hours": {
                "sunday": {"closed": true, "open_time": "09:00", "close_time": "18:00"}
            }
        });

        let res = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/v1/{}/settings", business_id))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            res.status().is_success(),
            "settings update failed: {}",
            res.status()
        );
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
