pub mod conflict;
pub mod schedule;
pub mod slots;
pub mod validate;

pub use conflict::is_slot_available;
pub use schedule::{resolve_schedule, DaySchedule, ScheduleError, TimeRange, WeeklySchedule};
pub use slots::{generate_slots, Slot};
pub use validate::{
    validate_and_prepare, BookingDraft, BookingPolicy, BookingRequest, InitialBookingStatus,
    RejectionReason,
};

use time::{Date, OffsetDateTime, Time};

/// Source of "today" for the past-date and horizon checks. Injected so the
/// validator can be exercised with fixed dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Reads the local calendar date; times in this system carry no timezone
/// and are implicitly local to the business.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }
}

pub(crate) fn minute_of_day(t: Time) -> i32 {
    i32::from(t.hour()) * 60 + i32::from(t.minute())
}

pub(crate) fn time_from_minute(minute: i32) -> Option<Time> {
    if !(0..24 * 60).contains(&minute) {
        return None;
    }
    Time::from_hms((minute / 60) as u8, (minute % 60) as u8, 0).ok()
}
