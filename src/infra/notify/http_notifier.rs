use crate::domain::models::appointment::Appointment;
use crate::domain::models::notification::NotifyReceipt;
use crate::domain::ports::Notifier;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

/// Hands appointment snapshots to an external delivery service. The caller
/// (the scheduler's post-commit fan-out) treats every failure as soft.
pub struct HttpNotifier {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpNotifier {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct NotificationPayload<'a> {
    to_addr: &'a str,
    kind: &'a str,
    title: &'a str,
    client_name: &'a str,
    date: String,
    time: &'a str,
    duration_min: i32,
    location: &'a str,
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(
        &self,
        recipient: &str,
        kind: &str,
        appointment: &Appointment,
    ) -> Result<NotifyReceipt, AppError> {
        let payload = NotificationPayload {
            to_addr: recipient,
            kind,
            title: &appointment.title,
            client_name: &appointment.client_name,
            date: appointment.date.to_string(),
            time: &appointment.time,
            duration_min: appointment.duration_min,
            location: &appointment.location,
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Notification service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Notification service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(NotifyReceipt {
            ok: true,
            provider: "http".to_string(),
        })
    }
}
