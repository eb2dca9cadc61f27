use serde::Serialize;

pub const KIND_CONFIRMATION: &str = "confirmation";
pub const KIND_PENDING: &str = "pending";

/// What a single dispatch attempt came back with.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyReceipt {
    pub ok: bool,
    pub provider: String,
}

/// Aggregated outcome of the post-commit notification fan-out. Dispatch
/// failures land here as missing recipients, never as request errors.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationSummary {
    pub mode: String,
    pub sent: Vec<String>,
}

impl NotificationSummary {
    pub fn new(mode: &str) -> Self {
        Self {
            mode: mode.to_string(),
            sent: Vec::new(),
        }
    }
}
