//! Orchestration of availability reads and booking writes.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{info, warn};

use crate::availability::mark_availability;
use crate::booking::{AppointmentEvent, BookingRequest, CreatedEvent, ValidatedBooking};
use crate::collaborators::{
    AnalyticsSink, AppointmentNotice, CalendarApi, ConversionEvent, NoticeKind, Notifier,
};
use crate::error::{BookingError, BookingResult};
use crate::slot::{SlotConfig, TimeSlot, generate_slots, local_instant};

/// Marks generated slots against calendar state and accepts bookings.
///
/// Stateless across requests; every call re-derives the grid and re-reads
/// the calendar.
pub struct Reconciler {
    config: SlotConfig,
    calendar: Arc<dyn CalendarApi>,
    notifier: Arc<dyn Notifier>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
}

impl Reconciler {
    pub fn new(
        config: SlotConfig,
        calendar: Arc<dyn CalendarApi>,
        notifier: Arc<dyn Notifier>,
        analytics: Option<Arc<dyn AnalyticsSink>>,
    ) -> Self {
        Reconciler {
            config,
            calendar,
            notifier,
            analytics,
        }
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Generate the grid for `date` and mark the slots that collide with
    /// existing events.
    pub async fn day_availability(&self, date: NaiveDate) -> BookingResult<Vec<TimeSlot>> {
        let mut slots = generate_slots(date, &self.config)?;
        let (day_start, day_end) = self.day_bounds(date)?;
        let busy = self.calendar.list_busy(day_start, day_end).await?;
        mark_availability(&mut slots, &busy);
        Ok(slots)
    }

    /// Validate and accept a booking. The calendar write alone decides the
    /// outcome; emails and analytics fan out afterwards and cannot fail it.
    ///
    /// The requested instant must fall on a slot boundary inside business
    /// hours, and the slot is re-checked against fresh busy intervals so two
    /// visitors cannot book the same window.
    pub async fn book(&self, request: &BookingRequest) -> BookingResult<CreatedEvent> {
        let booking = request.validated()?;

        let date = booking.start.with_timezone(&self.config.timezone).date_naive();
        let mut slots = generate_slots(date, &self.config)?;
        let Some(index) = slots.iter().position(|s| s.start == booking.start) else {
            return Err(BookingError::OutsideBusinessHours(
                booking.start.to_rfc3339(),
            ));
        };

        let (day_start, day_end) = self.day_bounds(date)?;
        let busy = self.calendar.list_busy(day_start, day_end).await?;
        mark_availability(&mut slots, &busy);
        if !slots[index].available {
            return Err(BookingError::SlotTaken(slots[index].display.clone()));
        }

        let event = AppointmentEvent::from_booking(&booking, &self.config);
        let created = self.calendar.create_event(&event).await?;
        info!(
            appointment_id = %created.id,
            client = %booking.client_email,
            slot = %slots[index].display,
            "appointment created"
        );

        self.fan_out(&booking);
        Ok(created)
    }

    /// Local midnight to next local midnight, as UTC instants.
    fn day_bounds(&self, date: NaiveDate) -> BookingResult<(DateTime<Utc>, DateTime<Utc>)> {
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| BookingError::InvalidDate(date.to_string()))?;
        let tz = self.config.timezone;
        Ok((
            local_instant(date, 0, 0, tz)?.to_utc(),
            local_instant(next, 0, 0, tz)?.to_utc(),
        ))
    }

    /// Best-effort side effects, spawned detached after the write committed.
    /// Failures are logged and go nowhere else.
    fn fan_out(&self, booking: &ValidatedBooking) {
        let local = booking.start.with_timezone(&self.config.timezone);
        let date_label = local.format("%d/%m/%Y").to_string();
        let time_label = local.format("%H:%M").to_string();

        for kind in [NoticeKind::Owner, NoticeKind::Client] {
            let notice = AppointmentNotice {
                kind,
                client_name: booking.client_name.clone(),
                client_email: booking.client_email.clone(),
                client_phone: booking.client_phone.clone(),
                client_company: booking.client_company.clone(),
                client_sector: booking.client_sector.clone(),
                client_message: booking.client_message.clone(),
                date_label: date_label.clone(),
                time_label: time_label.clone(),
            };
            let notifier = Arc::clone(&self.notifier);
            tokio::spawn(async move {
                if let Err(e) = notifier.send(&notice).await {
                    warn!(kind = ?notice.kind, "appointment email failed: {e}");
                }
            });
        }

        if let Some(analytics) = &self.analytics {
            let event = ConversionEvent {
                event_type: "appointment".to_string(),
                value: format!("{date_label} {time_label}"),
                source: "booking-api".to_string(),
                page: "calendrier".to_string(),
                details: format!("{} <{}>", booking.client_name, booking.client_email),
            };
            let analytics = Arc::clone(analytics);
            tokio::spawn(async move {
                if let Err(e) = analytics.record(&event).await {
                    warn!("conversion tracking failed: {e}");
                }
            });
        }
    }
}
