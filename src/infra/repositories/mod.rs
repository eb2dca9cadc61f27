pub mod postgres_appointment_repo;
pub mod postgres_business_repo;
pub mod postgres_settings_repo;
pub mod postgres_type_repo;
pub mod sqlite_appointment_repo;
pub mod sqlite_business_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_type_repo;
