//! Error types for the creneau ecosystem.

use thiserror::Error;

/// Errors that can occur while generating slots or handling bookings.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid slot configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Requested time {0} is not a bookable slot")]
    OutsideBusinessHours(String),

    #[error("The {0} slot is already taken")]
    SlotTaken(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Analytics error: {0}")]
    Analytics(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Upstream request timed out after {0}s")]
    UpstreamTimeout(u64),
}

impl BookingError {
    /// Errors caused by the request itself, caught before any external call.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidDate(_)
                | BookingError::MissingFields(_)
                | BookingError::OutsideBusinessHours(_)
        )
    }
}

/// Result type alias for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;
