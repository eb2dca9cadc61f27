use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, AppointmentTypeRepository, BusinessRepository, Notifier,
    SettingsRepository,
};
use crate::domain::services::scheduler::Scheduler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub business_repo: Arc<dyn BusinessRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub type_repo: Arc<dyn AppointmentTypeRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub scheduler: Arc<Scheduler>,
}
