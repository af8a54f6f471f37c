use std::sync::Arc;

use creneau_core::{AnalyticsSink, BookingResult, Reconciler};
use creneau_provider_google::GoogleCalendar;

use crate::analytics::ConversionsWebhook;
use crate::notify::BrevoMailer;
use crate::settings::Settings;

/// Shared application state: one reconciler wired to its collaborators.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
}

impl AppState {
    /// Production wiring: Google Calendar, Brevo, and (optionally) the
    /// conversions webhook.
    pub fn from_settings(settings: &Settings) -> BookingResult<Self> {
        let calendar = Arc::new(GoogleCalendar::from_env(settings.slots.timezone)?);
        let mailer = Arc::new(BrevoMailer::new(settings.brevo.clone()));
        let analytics = settings
            .conversions_webhook_url
            .clone()
            .map(|url| Arc::new(ConversionsWebhook::new(url)) as Arc<dyn AnalyticsSink>);

        Ok(AppState::new(Reconciler::new(
            settings.slots.clone(),
            calendar,
            mailer,
            analytics,
        )))
    }

    pub fn new(reconciler: Reconciler) -> Self {
        AppState {
            reconciler: Arc::new(reconciler),
        }
    }
}
