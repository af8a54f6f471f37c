//! `CalendarApi` implementation backed by the Google Calendar v3 API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use google_calendar::types::{OrderBy, SendUpdates};
use std::future::Future;
use std::time::Duration;

use creneau_core::{
    AppointmentEvent, BookingError, BookingResult, BusyInterval, CalendarApi, CreatedEvent,
    ReminderMethod,
};

use crate::settings::GoogleSettings;
use crate::tokens::TokenStore;

const UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Google Calendar collaborator for the booking reconciler.
pub struct GoogleCalendar {
    calendar_id: String,
    /// Zone used to normalize all-day entries.
    timezone: Tz,
    tokens: TokenStore,
}

impl GoogleCalendar {
    pub fn new(settings: GoogleSettings, timezone: Tz) -> Self {
        GoogleCalendar {
            calendar_id: settings.calendar_id.clone(),
            timezone,
            tokens: TokenStore::new(settings),
        }
    }

    /// Build from `GOOGLE_*` environment variables.
    pub fn from_env(timezone: Tz) -> BookingResult<Self> {
        Ok(Self::new(GoogleSettings::from_env()?, timezone))
    }

    async fn with_timeout<T, F>(&self, fut: F) -> BookingResult<T>
    where
        F: Future<Output = BookingResult<T>>,
    {
        tokio::time::timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS), fut)
            .await
            .map_err(|_| BookingError::UpstreamTimeout(UPSTREAM_TIMEOUT_SECS))?
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendar {
    async fn list_busy(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> BookingResult<Vec<BusyInterval>> {
        let tokens = self.tokens.get_valid().await?;
        let client = self.tokens.client(&tokens);

        let time_min = day_start.to_rfc3339();
        let time_max = day_end.to_rfc3339();

        let response = self
            .with_timeout(async {
                client
                    .events()
                    .list_all(
                        &self.calendar_id,
                        "",
                        0,
                        OrderBy::default(),
                        &[],
                        "",
                        &[],
                        false,
                        false,
                        true, // expand recurring events into single instances
                        &time_max,
                        &time_min,
                        "",
                        "",
                    )
                    .await
                    .map_err(|e| BookingError::Calendar(format!("event listing failed: {e}")))
            })
            .await?;

        let mut busy = Vec::new();
        for event in response.body {
            if event.status == "cancelled" || event.transparency == "transparent" {
                continue;
            }

            let (Some(start), Some(end)) = (event.start, event.end) else {
                continue;
            };

            match (start.date_time, end.date_time) {
                (Some(start_dt), Some(end_dt)) => {
                    busy.push(BusyInterval::new(start_dt, end_dt));
                }
                _ => {
                    // All-day entry: Google sends a date without time-of-day.
                    if let Some(date) = start.date {
                        busy.push(BusyInterval::all_day(date, self.timezone)?);
                    }
                }
            }
        }

        Ok(busy)
    }

    async fn create_event(&self, event: &AppointmentEvent) -> BookingResult<CreatedEvent> {
        let tokens = self.tokens.get_valid().await?;
        let client = self.tokens.client(&tokens);

        let google_event = to_google_event(event);

        let response = self
            .with_timeout(async {
                client
                    .events()
                    .insert(
                        &self.calendar_id,
                        0,
                        0,
                        false,
                        SendUpdates::All,
                        false,
                        &google_event,
                    )
                    .await
                    .map_err(|e| BookingError::Calendar(format!("event creation failed: {e}")))
            })
            .await?;

        let created = response.body;
        let link = if created.html_link.is_empty() {
            None
        } else {
            Some(created.html_link)
        };

        Ok(CreatedEvent {
            id: created.id,
            link,
        })
    }
}

fn to_google_event(event: &AppointmentEvent) -> google_calendar::types::Event {
    let reminders = google_calendar::types::Reminders {
        use_default: false,
        overrides: event
            .reminders
            .iter()
            .map(|r| google_calendar::types::EventReminder {
                method: match r.method {
                    ReminderMethod::Email => "email".to_string(),
                    ReminderMethod::Popup => "popup".to_string(),
                },
                minutes: r.minutes,
            })
            .collect(),
    };

    let attendee = google_calendar::types::EventAttendee {
        email: event.attendee_email.clone(),
        display_name: String::new(),
        response_status: "needsAction".to_string(),
        additional_guests: 0,
        comment: String::new(),
        id: String::new(),
        optional: false,
        organizer: false,
        resource: false,
        self_: false,
    };

    google_calendar::types::Event {
        summary: event.summary.clone(),
        description: event.description.clone(),
        start: Some(google_calendar::types::EventDateTime {
            date: None,
            date_time: Some(event.start.to_utc()),
            time_zone: event.timezone.name().to_string(),
        }),
        end: Some(google_calendar::types::EventDateTime {
            date: None,
            date_time: Some(event.end.to_utc()),
            time_zone: event.timezone.name().to_string(),
        }),
        attendees: vec![attendee],
        reminders: Some(reminders),
        status: "confirmed".to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use creneau_core::ReminderOverride;

    #[test]
    fn test_google_event_carries_window_and_zone() {
        let start = DateTime::parse_from_rfc3339("2024-12-16T15:00:00+01:00").unwrap();
        let event = AppointmentEvent {
            summary: "Audit SD Service - Jane Doe".to_string(),
            description: "Audit gratuit de 30 minutes avec Jane Doe".to_string(),
            start,
            end: start + chrono::Duration::minutes(30),
            timezone: chrono_tz::Europe::Paris,
            attendee_email: "jane@example.com".to_string(),
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
        };
        let google_event = to_google_event(&event);

        let start = google_event.start.unwrap();
        assert_eq!(
            start.date_time,
            Some(Utc.with_ymd_and_hms(2024, 12, 16, 14, 0, 0).unwrap())
        );
        assert_eq!(start.time_zone, "Europe/Paris");
        assert_eq!(google_event.attendees.len(), 1);
        assert_eq!(google_event.attendees[0].email, "jane@example.com");

        let reminders = google_event.reminders.unwrap();
        assert!(!reminders.use_default);
        assert_eq!(reminders.overrides.len(), 2);
    }
}
