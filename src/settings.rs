//! Environment configuration for the server.
//!
//! Deployment injects everything through environment variables; required
//! credentials are checked once at startup so a misconfigured instance
//! fails fast instead of failing per request.

use std::str::FromStr;

use chrono_tz::Tz;
use creneau_core::{BookingError, BookingResult, SlotConfig};

const DEFAULT_PORT: u16 = 3000;

pub struct Settings {
    pub port: u16,
    pub slots: SlotConfig,
    pub brevo: BrevoSettings,
    /// Google Apps Script webhook for conversion rows; tracking is skipped
    /// entirely when unset.
    pub conversions_webhook_url: Option<String>,
}

/// Brevo transactional-email configuration.
#[derive(Debug, Clone)]
pub struct BrevoSettings {
    pub api_key: String,
    pub owner_email: String,
    pub owner_name: String,
    pub owner_template_id: i64,
    pub client_template_id: i64,
}

impl Settings {
    pub fn from_env() -> BookingResult<Self> {
        let timezone: Tz = parse_var("BOOKING_TIMEZONE", chrono_tz::Europe::Paris)?;
        let slots = SlotConfig {
            business_start_hour: parse_var("BUSINESS_START_HOUR", 9)?,
            business_end_hour: parse_var("BUSINESS_END_HOUR", 18)?,
            slot_minutes: parse_var("SLOT_MINUTES", 30)?,
            timezone,
        };
        slots.validate()?;

        let brevo = BrevoSettings {
            api_key: require("BREVO_API_KEY")?,
            owner_email: require("OWNER_EMAIL")?,
            owner_name: std::env::var("OWNER_NAME").unwrap_or_else(|_| "SD Service".to_string()),
            owner_template_id: parse_var("BREVO_OWNER_TEMPLATE_ID", 3)?,
            client_template_id: parse_var("BREVO_CLIENT_TEMPLATE_ID", 4)?,
        };

        Ok(Settings {
            port: parse_var("PORT", DEFAULT_PORT)?,
            slots,
            brevo,
            conversions_webhook_url: std::env::var("CONVERSIONS_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.is_empty()),
        })
    }
}

fn require(name: &str) -> BookingResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(BookingError::MissingCredentials(name.to_string())),
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> BookingResult<T> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => raw.parse().map_err(|_| {
            BookingError::InvalidConfiguration(format!("{name}='{raw}' could not be parsed"))
        }),
        _ => Ok(default),
    }
}
