//! Reconciliation between the slot grid and existing calendar events.

use crate::busy::BusyInterval;
use crate::slot::TimeSlot;

/// Mark each slot unavailable when any busy interval overlaps it.
///
/// Linear scan; a day holds at most a few dozen slots and few events, so
/// nothing smarter is warranted.
pub fn mark_availability(slots: &mut [TimeSlot], busy: &[BusyInterval]) {
    for slot in slots.iter_mut() {
        slot.available = !busy.iter().any(|b| b.overlaps(slot.start, slot.end));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{SlotConfig, generate_slots, parse_day};
    use chrono::{DateTime, TimeZone, Utc};

    fn day_slots() -> Vec<TimeSlot> {
        generate_slots(parse_day("2024-12-16").unwrap(), &SlotConfig::default()).unwrap()
    }

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 16, h, m, 0).unwrap()
    }

    #[test]
    fn test_no_busy_intervals_leaves_everything_available() {
        let mut slots = day_slots();
        mark_availability(&mut slots, &[]);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn test_single_event_blocks_exactly_one_slot() {
        // 14:00Z-14:30Z is the 15:00-15:30 Paris slot in winter.
        let mut slots = day_slots();
        mark_availability(&mut slots, &[BusyInterval::new(utc(14, 0), utc(14, 30))]);

        let taken: Vec<_> = slots.iter().filter(|s| !s.available).collect();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].display, "15:00");
        assert_eq!(taken[0].start, utc(14, 0));
    }

    #[test]
    fn test_abutting_event_does_not_block_neighbours() {
        let mut slots = day_slots();
        mark_availability(&mut slots, &[BusyInterval::new(utc(14, 0), utc(14, 30))]);

        let before = slots.iter().find(|s| s.display == "14:30").unwrap();
        let after = slots.iter().find(|s| s.display == "15:30").unwrap();
        assert!(before.available);
        assert!(after.available);
    }

    #[test]
    fn test_long_event_blocks_every_covered_slot() {
        // 10:00Z-13:00Z covers the 11:00 through 13:30 Paris slots.
        let mut slots = day_slots();
        mark_availability(&mut slots, &[BusyInterval::new(utc(10, 0), utc(13, 0))]);

        let taken: Vec<_> = slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.display.as_str())
            .collect();
        assert_eq!(taken, ["11:00", "11:30", "12:00", "12:30", "13:00", "13:30"]);
    }

    #[test]
    fn test_all_day_event_blocks_the_whole_grid() {
        let mut slots = day_slots();
        let busy = BusyInterval::all_day(
            parse_day("2024-12-16").unwrap(),
            chrono_tz::Europe::Paris,
        )
        .unwrap();
        mark_availability(&mut slots, &[busy]);
        assert!(slots.iter().all(|s| !s.available));
    }

    #[test]
    fn test_remarking_is_idempotent() {
        let mut slots = day_slots();
        let busy = [BusyInterval::new(utc(14, 0), utc(14, 30))];
        mark_availability(&mut slots, &busy);
        let once = slots.clone();
        mark_availability(&mut slots, &busy);
        assert_eq!(slots, once);
    }
}
