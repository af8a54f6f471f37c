//! Booking requests and the calendar events they turn into.

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, BookingResult};
use crate::slot::SlotConfig;

/// Client-submitted booking data, as received on the wire. Everything is
/// optional at this layer; `Reconciler::book` rejects incomplete requests
/// before any external call is made.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    /// Requested appointment start, ISO-8601.
    pub datetime: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_sector: Option<String>,
    pub client_message: Option<String>,
    pub time_zone: Option<String>,
}

impl BookingRequest {
    /// Check mandatory fields and parse the target instant.
    pub(crate) fn validated(&self) -> BookingResult<ValidatedBooking> {
        let mut missing = Vec::new();
        if self.datetime.as_deref().is_none_or(str::is_empty) {
            missing.push("datetime");
        }
        if self.client_name.as_deref().is_none_or(str::is_empty) {
            missing.push("clientName");
        }
        if self.client_email.as_deref().is_none_or(str::is_empty) {
            missing.push("clientEmail");
        }
        if !missing.is_empty() {
            return Err(BookingError::MissingFields(missing.join(", ")));
        }

        let raw = self.datetime.as_deref().unwrap();
        let start = DateTime::parse_from_rfc3339(raw)
            .map_err(|_| BookingError::InvalidDate(format!("'{raw}' is not an ISO-8601 instant")))?;

        Ok(ValidatedBooking {
            start,
            client_name: self.client_name.clone().unwrap(),
            client_email: self.client_email.clone().unwrap(),
            client_phone: self.client_phone.clone(),
            client_company: self.client_company.clone(),
            client_sector: self.client_sector.clone(),
            client_message: self.client_message.clone(),
        })
    }
}

/// A booking request that passed field validation.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedBooking {
    pub start: DateTime<FixedOffset>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub client_sector: Option<String>,
    pub client_message: Option<String>,
}

/// The record handed to the calendar for creation. The calendar owns the
/// event afterwards; only the returned identifier is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub timezone: Tz,
    /// The client is invited so the calendar sends them the invitation.
    pub attendee_email: String,
    pub reminders: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderOverride {
    pub method: ReminderMethod,
    pub minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderMethod {
    Email,
    Popup,
}

impl AppointmentEvent {
    pub(crate) fn from_booking(booking: &ValidatedBooking, cfg: &SlotConfig) -> Self {
        let description = format!(
            "Audit gratuit de {} minutes avec {}\n\n\
             Email: {}\n\
             Téléphone: {}\n\
             Entreprise: {}\n\
             Secteur: {}\n\n\
             Message: {}",
            cfg.slot_minutes,
            booking.client_name,
            booking.client_email,
            booking.client_phone.as_deref().unwrap_or("Non fourni"),
            booking.client_company.as_deref().unwrap_or("Non fournie"),
            booking.client_sector.as_deref().unwrap_or("Non spécifié"),
            booking.client_message.as_deref().unwrap_or("Aucun message"),
        );

        AppointmentEvent {
            summary: format!("Audit SD Service - {}", booking.client_name),
            description,
            start: booking.start,
            end: booking.start + cfg.appointment_duration(),
            timezone: cfg.timezone,
            attendee_email: booking.client_email.clone(),
            reminders: vec![
                ReminderOverride {
                    method: ReminderMethod::Email,
                    minutes: 24 * 60,
                },
                ReminderOverride {
                    method: ReminderMethod::Popup,
                    minutes: 15,
                },
            ],
        }
    }
}

/// Identifier returned by the calendar after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedEvent {
    pub id: String,
    pub link: Option<String>,
}
