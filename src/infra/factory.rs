use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::scheduler::Scheduler;
use crate::infra::notify::http_notifier::HttpNotifier;
use crate::infra::repositories::{
    postgres_appointment_repo::PostgresAppointmentRepo,
    postgres_business_repo::PostgresBusinessRepo,
    postgres_settings_repo::PostgresSettingsRepo,
    postgres_type_repo::PostgresTypeRepo,
    sqlite_appointment_repo::SqliteAppointmentRepo,
    sqlite_business_repo::SqliteBusinessRepo,
    sqlite_settings_repo::SqliteSettingsRepo,
    sqlite_type_repo::SqliteTypeRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let notifier = Arc::new(HttpNotifier::new(
        config.notify_service_url.clone(),
        config.notify_service_token.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let business_repo = Arc::new(PostgresBusinessRepo::new(pool.clone()));
        let settings_repo = Arc::new(PostgresSettingsRepo::new(pool.clone()));
        let type_repo = Arc::new(PostgresTypeRepo::new(pool.clone()));
        let appointment_repo = Arc::new(PostgresAppointmentRepo::new(pool.clone()));

        let scheduler = Arc::new(Scheduler::new(
            appointment_repo.clone(),
            type_repo.clone(),
            settings_repo.clone(),
            notifier.clone(),
        ));

        AppState {
            config: config.clone(),
            business_repo,
            settings_repo,
            type_repo,
            appointment_repo,
            notifier,
            scheduler,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        // One connection: write transactions cannot interleave, which is the
        // serialization the appointment writer relies on for this backend.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

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

        AppState {
            config: config.clone(),
            business_repo,
            settings_repo,
            type_repo,
            appointment_repo,
            notifier,
            scheduler,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
