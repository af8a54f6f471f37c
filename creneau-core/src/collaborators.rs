//! Injected interfaces to the external calendar, email, and analytics
//! services.
//!
//! The reconciler only ever talks to these traits; concrete bindings
//! (Google Calendar, Brevo, the conversions webhook) live in their own
//! crates or in the server binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::booking::{AppointmentEvent, CreatedEvent};
use crate::busy::BusyInterval;
use crate::error::BookingResult;

/// Read/write access to the remote calendar.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Busy spans between `day_start` and `day_end` (half-open).
    async fn list_busy(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> BookingResult<Vec<BusyInterval>>;

    async fn create_event(&self, event: &AppointmentEvent) -> BookingResult<CreatedEvent>;
}

/// Outbound appointment emails. Failures never affect a booking that the
/// calendar already accepted.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notice: &AppointmentNotice) -> BookingResult<()>;
}

/// Fire-and-forget conversion tracking.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, event: &ConversionEvent) -> BookingResult<()>;
}

/// Which side of the appointment an email goes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    /// Heads-up to the business owner, with the full client details.
    Owner,
    /// Confirmation to the client.
    Client,
}

/// Everything the email templates need about a confirmed appointment.
#[derive(Debug, Clone)]
pub struct AppointmentNotice {
    pub kind: NoticeKind,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_sector: Option<String>,
    pub client_message: Option<String>,
    /// Local date label, e.g. "16/12/2024".
    pub date_label: String,
    /// Local time label, e.g. "15:00".
    pub time_label: String,
}

/// One row for the conversions sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub value: String,
    pub source: String,
    pub page: String,
    pub details: String,
}
