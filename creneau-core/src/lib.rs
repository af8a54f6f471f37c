//! Core booking domain for the creneau ecosystem.
//!
//! This crate provides the provider-neutral pieces shared by the HTTP
//! server and the calendar providers:
//! - `slot` for the business-hours grid
//! - `availability` for reconciling the grid against calendar events
//! - `reconciler` for the booking workflow itself
//! - `collaborators` for the injected calendar/email/analytics interfaces

pub mod availability;
pub mod booking;
pub mod busy;
pub mod collaborators;
pub mod error;
pub mod reconciler;
pub mod slot;

pub use availability::mark_availability;
pub use booking::{AppointmentEvent, BookingRequest, CreatedEvent, ReminderMethod, ReminderOverride};
pub use busy::BusyInterval;
pub use collaborators::{
    AnalyticsSink, AppointmentNotice, CalendarApi, ConversionEvent, NoticeKind, Notifier,
};
pub use error::{BookingError, BookingResult};
pub use reconciler::Reconciler;
pub use slot::{SlotConfig, TimeSlot, generate_slots, parse_day};
