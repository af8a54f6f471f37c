//! Busy intervals sourced from the remote calendar.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{BookingError, BookingResult};
use crate::slot::local_instant;

/// An existing event's occupied span, half-open `[start, end)`.
/// Owned by the remote calendar; read-only here.
#[derive(Debug, Clone, PartialEq)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        BusyInterval { start, end }
    }

    /// Normalize an all-day entry to `[00:00, 24:00)` of `date` in `tz`.
    pub fn all_day(date: NaiveDate, tz: Tz) -> BookingResult<Self> {
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| BookingError::InvalidDate(date.to_string()))?;
        Ok(BusyInterval {
            start: local_instant(date, 0, 0, tz)?.to_utc(),
            end: local_instant(next, 0, 0, tz)?.to_utc(),
        })
    }

    /// Half-open overlap test against `[start, end)`. Abutting spans do not
    /// overlap.
    pub fn overlaps(&self, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> bool {
        start < self.end && end > self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 16, h, m, 0).unwrap()
    }

    #[test]
    fn test_abutting_spans_do_not_overlap() {
        let busy = BusyInterval::new(utc(10, 0), utc(10, 30));
        assert!(!busy.overlaps(utc(9, 30).fixed_offset(), utc(10, 0).fixed_offset()));
        assert!(!busy.overlaps(utc(10, 30).fixed_offset(), utc(11, 0).fixed_offset()));
    }

    #[test]
    fn test_partial_overlap_detected() {
        let busy = BusyInterval::new(utc(10, 0), utc(10, 30));
        assert!(busy.overlaps(utc(9, 45).fixed_offset(), utc(10, 15).fixed_offset()));
        assert!(busy.overlaps(utc(10, 15).fixed_offset(), utc(10, 45).fixed_offset()));
    }

    #[test]
    fn test_containment_detected_both_ways() {
        let busy = BusyInterval::new(utc(10, 0), utc(10, 30));
        // Span fully containing the busy interval.
        assert!(busy.overlaps(utc(9, 0).fixed_offset(), utc(11, 0).fixed_offset()));
        // Busy interval fully containing the span.
        assert!(busy.overlaps(utc(10, 10).fixed_offset(), utc(10, 20).fixed_offset()));
    }

    #[test]
    fn test_all_day_normalizes_to_local_midnights() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let busy = BusyInterval::all_day(date, chrono_tz::Europe::Paris).unwrap();
        // Paris midnight is 23:00 UTC the previous day in winter.
        assert_eq!(busy.start, Utc.with_ymd_and_hms(2024, 12, 15, 23, 0, 0).unwrap());
        assert_eq!(busy.end, Utc.with_ymd_and_hms(2024, 12, 16, 23, 0, 0).unwrap());
    }
}
