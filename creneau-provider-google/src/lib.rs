//! Google Calendar binding for the creneau booking service.
//!
//! Implements `creneau_core::CalendarApi` on top of the Google Calendar v3
//! API: busy intervals come from the day's event list, bookings become
//! inserted events with the client invited as attendee.

pub mod calendar;
pub mod settings;
pub mod tokens;

pub use calendar::GoogleCalendar;
pub use settings::GoogleSettings;
pub use tokens::{AccountTokens, TokenStore};
