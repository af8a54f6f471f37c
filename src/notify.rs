//! Brevo transactional-email binding for appointment notifications.
//!
//! Two templates exist on the Brevo side: a heads-up to the owner with the
//! full client details, and a confirmation to the client. Template ids are
//! configured through the environment.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use creneau_core::{AppointmentNotice, BookingError, BookingResult, NoticeKind, Notifier};

use crate::settings::BrevoSettings;

const BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct BrevoMailer {
    settings: BrevoSettings,
    client: reqwest::Client,
}

impl BrevoMailer {
    pub fn new(settings: BrevoSettings) -> Self {
        BrevoMailer {
            settings,
            client: reqwest::Client::new(),
        }
    }

    fn template_params(&self, notice: &AppointmentNotice) -> serde_json::Value {
        match notice.kind {
            NoticeKind::Owner => json!({
                "appointment_date": notice.date_label,
                "appointment_time": notice.time_label,
                "client_name": notice.client_name,
                "client_email": notice.client_email,
                "client_phone": notice.client_phone.as_deref().unwrap_or("Non fourni"),
                "client_company": notice.client_company.as_deref().unwrap_or("Non fournie"),
                "client_sector": notice.client_sector.as_deref().unwrap_or("Non spécifié"),
                "client_message": notice.client_message.as_deref().unwrap_or("Aucun message"),
            }),
            NoticeKind::Client => json!({
                "client_name": notice.client_name,
                "appointment_date": notice.date_label,
                "appointment_time": notice.time_label,
            }),
        }
    }
}

#[async_trait]
impl Notifier for BrevoMailer {
    async fn send(&self, notice: &AppointmentNotice) -> BookingResult<()> {
        let (template_id, to_email, to_name) = match notice.kind {
            NoticeKind::Owner => (
                self.settings.owner_template_id,
                self.settings.owner_email.as_str(),
                self.settings.owner_name.as_str(),
            ),
            NoticeKind::Client => (
                self.settings.client_template_id,
                notice.client_email.as_str(),
                notice.client_name.as_str(),
            ),
        };

        let body = json!({
            "templateId": template_id,
            "to": [{ "email": to_email, "name": to_name }],
            "params": self.template_params(notice),
        });

        let response = self
            .client
            .post(BREVO_API_URL)
            .timeout(SEND_TIMEOUT)
            .header("Accept", "application/json")
            .header("Api-Key", &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| BookingError::Notification(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(BookingError::Notification(format!(
                "Brevo API error {status}: {text}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(kind: NoticeKind) -> AppointmentNotice {
        AppointmentNotice {
            kind,
            client_name: "Jane Doe".into(),
            client_email: "jane@example.com".into(),
            client_phone: None,
            client_company: Some("Acme".into()),
            client_sector: None,
            client_message: None,
            date_label: "16/12/2024".into(),
            time_label: "15:00".into(),
        }
    }

    fn mailer() -> BrevoMailer {
        BrevoMailer::new(BrevoSettings {
            api_key: "key".into(),
            owner_email: "owner@example.com".into(),
            owner_name: "SD Service".into(),
            owner_template_id: 3,
            client_template_id: 4,
        })
    }

    #[test]
    fn test_owner_params_carry_placeholders() {
        let params = mailer().template_params(&notice(NoticeKind::Owner));
        assert_eq!(params["client_phone"], "Non fourni");
        assert_eq!(params["client_company"], "Acme");
        assert_eq!(params["client_message"], "Aucun message");
        assert_eq!(params["appointment_time"], "15:00");
    }

    #[test]
    fn test_client_params_stay_minimal() {
        let params = mailer().template_params(&notice(NoticeKind::Client));
        assert_eq!(params["client_name"], "Jane Doe");
        assert!(params.get("client_phone").is_none());
    }
}
