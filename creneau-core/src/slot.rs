//! Slot grid generation.
//!
//! A day's bookable windows are derived purely from the business-hours
//! configuration; no clock or I/O is involved, so the same inputs always
//! produce the same grid.

use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, BookingResult};

/// One bookable window within business hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// Local-time label shown to the visitor, e.g. "09:30".
    pub display: String,
    pub available: bool,
}

/// Business-hours grid configuration.
#[derive(Debug, Clone)]
pub struct SlotConfig {
    /// First bookable hour of the day (inclusive), 0-24.
    pub business_start_hour: u32,
    /// End of the bookable day (exclusive), 0-24.
    pub business_end_hour: u32,
    /// Slot length in minutes; must evenly divide 60.
    pub slot_minutes: u32,
    pub timezone: Tz,
}

impl Default for SlotConfig {
    /// Canonical grid: 09:00-18:00 Paris time, 30-minute slots.
    fn default() -> Self {
        SlotConfig {
            business_start_hour: 9,
            business_end_hour: 18,
            slot_minutes: 30,
            timezone: chrono_tz::Europe::Paris,
        }
    }
}

impl SlotConfig {
    pub fn validate(&self) -> BookingResult<()> {
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(BookingError::InvalidConfiguration(format!(
                "slot length {} does not divide 60 minutes",
                self.slot_minutes
            )));
        }
        if self.business_end_hour <= self.business_start_hour || self.business_end_hour > 24 {
            return Err(BookingError::InvalidConfiguration(format!(
                "business hours {}-{} are not a valid range",
                self.business_start_hour, self.business_end_hour
            )));
        }
        Ok(())
    }

    /// Number of slots a full day yields.
    pub fn slots_per_day(&self) -> u32 {
        (self.business_end_hour - self.business_start_hour) * 60 / self.slot_minutes
    }

    /// Appointments occupy exactly one slot.
    pub fn appointment_duration(&self) -> Duration {
        Duration::minutes(self.slot_minutes as i64)
    }
}

/// Parse a `YYYY-MM-DD` day string.
pub fn parse_day(s: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(format!("'{s}' is not a YYYY-MM-DD date")))
}

/// Enumerate the day's candidate appointment windows, all marked available.
///
/// Slots are emitted in ascending order and cover exactly
/// `[business_start_hour, business_end_hour)` of `date` in the configured
/// timezone.
pub fn generate_slots(date: NaiveDate, cfg: &SlotConfig) -> BookingResult<Vec<TimeSlot>> {
    cfg.validate()?;

    let mut slots = Vec::with_capacity(cfg.slots_per_day() as usize);
    for hour in cfg.business_start_hour..cfg.business_end_hour {
        for minute in (0..60).step_by(cfg.slot_minutes as usize) {
            let start = local_instant(date, hour, minute, cfg.timezone)?;
            slots.push(TimeSlot {
                display: start.format("%H:%M").to_string(),
                end: start + cfg.appointment_duration(),
                start,
                available: true,
            });
        }
    }
    Ok(slots)
}

/// Resolve a wall-clock time on `date` in `tz` to a fixed-offset instant.
/// DST fold picks the earlier offset; a time inside a DST gap is an error.
pub(crate) fn local_instant(
    date: NaiveDate,
    hour: u32,
    minute: u32,
    tz: Tz,
) -> BookingResult<DateTime<FixedOffset>> {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| BookingError::InvalidDate(format!("{date} {hour:02}:{minute:02}")))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.fixed_offset()),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.fixed_offset()),
        LocalResult::None => Err(BookingError::InvalidDate(format!(
            "{naive} does not exist in {tz}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn paris() -> SlotConfig {
        SlotConfig::default()
    }

    #[test]
    fn test_full_day_grid_shape() {
        let date = parse_day("2024-12-16").unwrap();
        let slots = generate_slots(date, &paris()).unwrap();

        assert_eq!(slots.len(), 18);
        assert!(slots.iter().all(|s| s.available));
        assert!(slots.windows(2).all(|w| w[0].end == w[1].start));

        let first = &slots[0];
        assert_eq!(first.display, "09:00");
        assert_eq!(first.start.to_rfc3339(), "2024-12-16T09:00:00+01:00");
        assert_eq!(slots.last().unwrap().end.hour(), 18);
    }

    #[test]
    fn test_slot_length_invariant() {
        let date = parse_day("2024-12-16").unwrap();
        let cfg = paris();
        for slot in generate_slots(date, &cfg).unwrap() {
            assert_eq!(slot.end - slot.start, cfg.appointment_duration());
        }
    }

    #[test]
    fn test_deterministic_output() {
        let date = parse_day("2025-03-03").unwrap();
        let a = generate_slots(date, &paris()).unwrap();
        let b = generate_slots(date, &paris()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fifteen_minute_grid() {
        let mut cfg = paris();
        cfg.slot_minutes = 15;
        let date = parse_day("2024-12-16").unwrap();
        let slots = generate_slots(date, &cfg).unwrap();
        assert_eq!(slots.len(), 36);
        assert_eq!(slots[1].display, "09:15");
    }

    #[test]
    fn test_rejects_slot_length_not_dividing_hour() {
        let mut cfg = paris();
        cfg.slot_minutes = 25;
        let err = generate_slots(parse_day("2024-12-16").unwrap(), &cfg).unwrap_err();
        assert!(matches!(err, BookingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_inverted_business_hours() {
        let mut cfg = paris();
        cfg.business_start_hour = 18;
        cfg.business_end_hour = 9;
        let err = generate_slots(parse_day("2024-12-16").unwrap(), &cfg).unwrap_err();
        assert!(matches!(err, BookingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_malformed_date() {
        assert!(matches!(
            parse_day("16/12/2024"),
            Err(BookingError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_day("2024-13-40"),
            Err(BookingError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_summer_offset_applied() {
        // Paris is UTC+2 in July.
        let date = parse_day("2025-07-07").unwrap();
        let slots = generate_slots(date, &paris()).unwrap();
        assert_eq!(slots[0].start.to_rfc3339(), "2025-07-07T09:00:00+02:00");
        assert_eq!(slots[0].display, "09:00");
    }
}
