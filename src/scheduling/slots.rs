use serde::Serialize;
use time::{Date, Time};

use super::conflict::is_slot_available;
use super::{minute_of_day, schedule::DaySchedule, time_from_minute};
use crate::db::models::{timefmt, Booking};

/// One entry of the bookable-times grid shown to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    #[serde(with = "timefmt::time_hm")]
    pub time: Time,
    pub available: bool,
}

/// Enumerates candidate start times for one professional/date/service at a
/// stride equal to the service duration, starting at opening time. A slot
/// whose full service window would run past closing is dropped, not marked
/// unavailable. Each emitted slot's `available` flag comes from
/// [`is_slot_available`], so the grid and the booking acceptance path can
/// never disagree.
///
/// Duration must be positive; the caller validates service durations at the
/// boundary.
pub fn generate_slots(
    schedule: Option<&DaySchedule>,
    existing: &[Booking],
    duration_minutes: u16,
    date: Date,
) -> Vec<Slot> {
    let Some(day) = schedule else {
        return Vec::new();
    };
    debug_assert!(duration_minutes > 0);
    if duration_minutes == 0 {
        return Vec::new();
    }

    let stride = i32::from(duration_minutes);
    let closing = minute_of_day(day.end);
    let mut slots = Vec::new();
    let mut cursor = minute_of_day(day.start);

    while cursor + stride <= closing {
        let Some(start) = time_from_minute(cursor) else {
            break;
        };
        slots.push(Slot {
            time: start,
            available: is_slot_available(schedule, date, start, duration_minutes, existing),
        });
        cursor += stride;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::test_support::booking_at;
    use crate::db::models::BookingStatus;
    use crate::scheduling::schedule::TimeRange;
    use time::macros::{date, time};

    const DAY: Date = date!(2025 - 06 - 03);

    fn open_day(start: Time, end: Time, breaks: Vec<TimeRange>) -> DaySchedule {
        DaySchedule { start, end, breaks }
    }

    fn times(slots: &[Slot]) -> Vec<Time> {
        slots.iter().map(|s| s.time).collect()
    }

    #[test]
    fn morning_schedule_yields_three_hourly_slots() {
        // 09:00-12:00, 60-minute service, empty book.
        let day = open_day(time!(09:00), time!(12:00), vec![]);
        let slots = generate_slots(Some(&day), &[], 60, DAY);
        assert_eq!(times(&slots), vec![time!(09:00), time!(10:00), time!(11:00)]);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn existing_booking_marks_only_its_slot_unavailable() {
        let day = open_day(time!(09:00), time!(12:00), vec![]);
        let taken = booking_at(DAY, time!(10:00), time!(11:00), BookingStatus::Confirmed);
        let slots = generate_slots(Some(&day), &[taken], 60, DAY);
        let availability: Vec<bool> = slots.iter().map(|s| s.available).collect();
        assert_eq!(availability, vec![true, false, true]);
    }

    #[test]
    fn slots_overlapping_a_break_are_unavailable() {
        // 30-minute stride puts a slot at 11:30 whose window 11:30-12:30
        // overlaps the 12:00-13:00 break.
        let day = open_day(
            time!(09:00),
            time!(18:00),
            vec![TimeRange { start: time!(12:00), end: time!(13:00) }],
        );
        let slots = generate_slots(Some(&day), &[], 30, DAY);
        let at = |t: Time| slots.iter().find(|s| s.time == t).unwrap();
        assert!(!at(time!(11:30)).available);
        assert!(!at(time!(12:00)).available);
        assert!(!at(time!(12:30)).available);
        assert!(at(time!(11:00)).available);
        assert!(at(time!(13:00)).available);
    }

    #[test]
    fn blocked_day_yields_no_slots() {
        let taken = booking_at(DAY, time!(10:00), time!(11:00), BookingStatus::Confirmed);
        assert!(generate_slots(None, &[taken], 60, DAY).is_empty());
    }

    #[test]
    fn slots_never_run_past_closing() {
        // 09:00-12:30 with a 45-minute service: 11:15 ends at 12:00 and is
        // kept; 12:00 would run to 12:45 and is never emitted.
        let day = open_day(time!(09:00), time!(12:30), vec![]);
        let slots = generate_slots(Some(&day), &[], 45, DAY);
        for slot in &slots {
            let end = super::minute_of_day(slot.time) + 45;
            assert!(end <= super::minute_of_day(day.end));
            assert!(slot.time >= day.start);
        }
        assert_eq!(slots.last().map(|s| s.time), Some(time!(11:15)));
    }

    #[test]
    fn stride_equals_service_duration() {
        let day = open_day(time!(09:00), time!(18:00), vec![]);
        let slots = generate_slots(Some(&day), &[], 45, DAY);
        for pair in slots.windows(2) {
            let gap = super::minute_of_day(pair[1].time) - super::minute_of_day(pair[0].time);
            assert_eq!(gap, 45);
        }
    }

    #[test]
    fn grid_agrees_with_the_availability_predicate() {
        let day = open_day(
            time!(09:00),
            time!(18:00),
            vec![TimeRange { start: time!(12:00), end: time!(13:00) }],
        );
        let existing = vec![
            booking_at(DAY, time!(09:30), time!(10:15), BookingStatus::Confirmed),
            booking_at(DAY, time!(15:00), time!(16:00), BookingStatus::Pending),
            booking_at(DAY, time!(16:00), time!(17:00), BookingStatus::Cancelled),
        ];
        for slot in generate_slots(Some(&day), &existing, 45, DAY) {
            assert_eq!(
                slot.available,
                is_slot_available(Some(&day), DAY, slot.time, 45, &existing)
            );
        }
    }

    #[test]
    fn persisted_booking_blocks_its_own_slot_on_recheck() {
        let day = open_day(time!(09:00), time!(12:00), vec![]);
        let slots = generate_slots(Some(&day), &[], 60, DAY);
        let chosen = slots.iter().find(|s| s.available).unwrap().time;

        let persisted = booking_at(
            DAY,
            chosen,
            chosen + time::Duration::hours(1),
            BookingStatus::Confirmed,
        );
        assert!(!is_slot_available(Some(&day), DAY, chosen, 60, &[persisted.clone()]));
        let regenerated = generate_slots(Some(&day), &[persisted], 60, DAY);
        assert!(!regenerated.iter().find(|s| s.time == chosen).unwrap().available);
    }

    #[test]
    fn cancelled_bookings_never_reduce_availability() {
        let day = open_day(time!(09:00), time!(12:00), vec![]);
        let cancelled = booking_at(DAY, time!(10:00), time!(11:00), BookingStatus::Cancelled);
        let with_cancelled = generate_slots(Some(&day), &[cancelled], 60, DAY);
        let without = generate_slots(Some(&day), &[], 60, DAY);
        assert_eq!(with_cancelled, without);
    }
}
