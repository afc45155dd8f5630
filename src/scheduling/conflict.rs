use time::{Date, Time};

use super::{minute_of_day, schedule::DaySchedule};
use crate::db::models::{Booking, BookingStatus};

/// Half-open interval overlap: [a_start, a_end) intersects [b_start, b_end).
/// Catches partial overlap and full containment in either direction, unlike
/// a point-in-interval check.
pub(crate) fn intervals_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && a_end > b_start
}

/// The single availability predicate. Both the slot grid and the booking
/// acceptance path go through here; a candidate interval is free iff it
/// lies inside working hours and overlaps no break and no live booking on
/// the same date. Cancelled bookings release their slot.
pub fn is_slot_available(
    schedule: Option<&DaySchedule>,
    date: Date,
    start: Time,
    duration_minutes: u16,
    existing: &[Booking],
) -> bool {
    let Some(day) = schedule else {
        return false;
    };

    let candidate_start = minute_of_day(start);
    let candidate_end = candidate_start + i32::from(duration_minutes);

    if candidate_start < minute_of_day(day.start) || candidate_end > minute_of_day(day.end) {
        return false;
    }

    let overlaps_break = day.breaks.iter().any(|range| {
        intervals_overlap(
            candidate_start,
            candidate_end,
            minute_of_day(range.start),
            minute_of_day(range.end),
        )
    });
    if overlaps_break {
        return false;
    }

    !existing.iter().any(|booking| {
        booking.date == date
            && booking.status != BookingStatus::Cancelled
            && intervals_overlap(
                candidate_start,
                candidate_end,
                minute_of_day(booking.start_time),
                minute_of_day(booking.end_time),
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::test_support::booking_at;
    use crate::scheduling::schedule::TimeRange;
    use time::macros::{date, time};

    fn open_day(start: Time, end: Time, breaks: Vec<TimeRange>) -> DaySchedule {
        DaySchedule { start, end, breaks }
    }

    const DAY: Date = date!(2025 - 06 - 03);

    #[test]
    fn overlap_is_half_open() {
        // Adjacent intervals share an endpoint but do not overlap.
        assert!(!intervals_overlap(600, 660, 660, 720));
        assert!(!intervals_overlap(660, 720, 600, 660));
        // Partial overlap, both directions.
        assert!(intervals_overlap(600, 660, 630, 690));
        assert!(intervals_overlap(630, 690, 600, 660));
        // Containment, both directions.
        assert!(intervals_overlap(600, 720, 630, 660));
        assert!(intervals_overlap(630, 660, 600, 720));
        // Identical intervals.
        assert!(intervals_overlap(600, 660, 600, 660));
    }

    #[test]
    fn closed_day_has_no_availability() {
        assert!(!is_slot_available(None, DAY, time!(10:00), 60, &[]));
    }

    #[test]
    fn candidate_must_fit_within_working_hours() {
        let day = open_day(time!(09:00), time!(12:00), vec![]);
        assert!(is_slot_available(Some(&day), DAY, time!(09:00), 60, &[]));
        // Ends exactly at closing: allowed. Runs past closing: not.
        assert!(is_slot_available(Some(&day), DAY, time!(11:00), 60, &[]));
        assert!(!is_slot_available(Some(&day), DAY, time!(11:30), 60, &[]));
        assert!(!is_slot_available(Some(&day), DAY, time!(08:30), 60, &[]));
    }

    #[test]
    fn breaks_block_overlapping_candidates() {
        let day = open_day(
            time!(09:00),
            time!(18:00),
            vec![TimeRange { start: time!(12:00), end: time!(13:00) }],
        );
        assert!(!is_slot_available(Some(&day), DAY, time!(12:00), 60, &[]));
        assert!(!is_slot_available(Some(&day), DAY, time!(11:30), 60, &[]));
        assert!(!is_slot_available(Some(&day), DAY, time!(12:30), 60, &[]));
        // A long candidate fully containing the break is also blocked.
        assert!(!is_slot_available(Some(&day), DAY, time!(11:00), 180, &[]));
        // Touching the break on either side is fine.
        assert!(is_slot_available(Some(&day), DAY, time!(11:00), 60, &[]));
        assert!(is_slot_available(Some(&day), DAY, time!(13:00), 60, &[]));
    }

    #[test]
    fn live_bookings_block_and_cancelled_ones_do_not() {
        let day = open_day(time!(09:00), time!(18:00), vec![]);
        let confirmed = booking_at(DAY, time!(10:00), time!(11:00), BookingStatus::Confirmed);
        let cancelled = booking_at(DAY, time!(14:00), time!(15:00), BookingStatus::Cancelled);
        let existing = vec![confirmed, cancelled];

        assert!(!is_slot_available(Some(&day), DAY, time!(10:00), 60, &existing));
        assert!(!is_slot_available(Some(&day), DAY, time!(10:30), 60, &existing));
        // The cancelled booking's window stays free.
        assert!(is_slot_available(Some(&day), DAY, time!(14:00), 60, &existing));
    }

    #[test]
    fn bookings_on_other_dates_are_ignored() {
        let day = open_day(time!(09:00), time!(18:00), vec![]);
        let other_day = booking_at(
            date!(2025 - 06 - 04),
            time!(10:00),
            time!(11:00),
            BookingStatus::Confirmed,
        );
        assert!(is_slot_available(Some(&day), DAY, time!(10:00), 60, &[other_day]));
    }

    #[test]
    fn candidate_containing_a_booking_is_blocked() {
        // The point-containment style missed this case.
        let day = open_day(time!(09:00), time!(18:00), vec![]);
        let short = booking_at(DAY, time!(10:30), time!(11:00), BookingStatus::Confirmed);
        assert!(!is_slot_available(Some(&day), DAY, time!(10:00), 120, &[short]));
    }
}
