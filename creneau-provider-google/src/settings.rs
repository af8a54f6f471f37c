//! Environment configuration for the Google Calendar binding.
//!
//! The service runs headless, so there is no interactive OAuth consent
//! flow here: a refresh token obtained out-of-band is injected through the
//! environment together with the OAuth client credentials.

use creneau_core::{BookingError, BookingResult};

/// OAuth client credentials plus the target calendar.
#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub calendar_id: String,
}

impl GoogleSettings {
    /// Load from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`,
    /// `GOOGLE_REFRESH_TOKEN` and `GOOGLE_CALENDAR_ID` (defaults to
    /// `primary`).
    pub fn from_env() -> BookingResult<Self> {
        Ok(GoogleSettings {
            client_id: require("GOOGLE_CLIENT_ID")?,
            client_secret: require("GOOGLE_CLIENT_SECRET")?,
            refresh_token: require("GOOGLE_REFRESH_TOKEN")?,
            calendar_id: std::env::var("GOOGLE_CALENDAR_ID")
                .unwrap_or_else(|_| "primary".to_string()),
        })
    }
}

fn require(name: &str) -> BookingResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(BookingError::MissingCredentials(name.to_string())),
    }
}
