use serde::Serialize;
use time::{Date, Duration, Time};
use uuid::Uuid;

use super::conflict::is_slot_available;
use super::schedule::{resolve_schedule, WeeklySchedule};
use super::{minute_of_day, time_from_minute};
use crate::db::models::{Booking, BookingStatus, DayOverride, Service};

/// Whether freshly created bookings await moderation or are accepted
/// outright. Both flows exist in production; this is a product decision
/// surfaced as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialBookingStatus {
    Pending,
    Confirmed,
}

impl InitialBookingStatus {
    fn as_booking_status(self) -> BookingStatus {
        match self {
            InitialBookingStatus::Pending => BookingStatus::Pending,
            InitialBookingStatus::Confirmed => BookingStatus::Confirmed,
        }
    }
}

/// Business rules around booking acceptance. Defaults mirror the live
/// site: 90-day horizon, 3 bookings per phone per day, auto-confirm.
#[derive(Debug, Clone, Copy)]
pub struct BookingPolicy {
    pub horizon_days: i64,
    pub daily_limit: usize,
    pub initial_status: InitialBookingStatus,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            horizon_days: 90,
            daily_limit: 3,
            initial_status: InitialBookingStatus::Confirmed,
        }
    }
}

/// Machine-readable rejection codes, ordered by check priority. The HTTP
/// layer maps these to statuses and user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    PastDate,
    TooFarFuture,
    DayBlocked,
    SlotUnavailable,
    LimitExceeded,
}

impl RejectionReason {
    pub fn as_code(self) -> &'static str {
        match self {
            RejectionReason::PastDate => "past_date",
            RejectionReason::TooFarFuture => "too_far_future",
            RejectionReason::DayBlocked => "day_blocked",
            RejectionReason::SlotUnavailable => "slot_unavailable",
            RejectionReason::LimitExceeded => "limit_exceeded",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RejectionReason::PastDate => "Cannot book a date in the past",
            RejectionReason::TooFarFuture => "Date is beyond the booking horizon",
            RejectionReason::DayBlocked => "This day is not open for bookings",
            RejectionReason::SlotUnavailable => "The requested time is not available",
            RejectionReason::LimitExceeded => "Daily booking limit reached for this phone",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A booking request after payload validation, before business checks.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: Date,
    pub start_time: Time,
    pub notes: Option<String>,
}

/// An accepted booking, ready for the storage layer to persist. The end
/// time is always computed from the service duration here; clients do not
/// get to choose it.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub confirmation_token: String,
}

/// Runs the ordered acceptance checks; the first failure wins.
///
/// Pure over its inputs: "today" is injected and the bookings snapshot is
/// whatever the caller read, so the storage layer can re-invoke this
/// inside whatever mutual-exclusion scheme it uses for the final write.
pub fn validate_and_prepare(
    request: &BookingRequest,
    weekly: &WeeklySchedule,
    service: &Service,
    day_override: Option<&DayOverride>,
    existing: &[Booking],
    today: Date,
    policy: &BookingPolicy,
) -> Result<BookingDraft, RejectionReason> {
    if request.date < today {
        return Err(RejectionReason::PastDate);
    }
    if request.date > today + Duration::days(policy.horizon_days) {
        return Err(RejectionReason::TooFarFuture);
    }

    // A null resolution covers both an explicit block and a weekly day off.
    let schedule = resolve_schedule(weekly, day_override, request.date.weekday());
    if schedule.is_none() {
        return Err(RejectionReason::DayBlocked);
    }

    if !is_slot_available(
        schedule,
        request.date,
        request.start_time,
        service.duration_minutes,
        existing,
    ) {
        return Err(RejectionReason::SlotUnavailable);
    }

    let same_customer_today = existing
        .iter()
        .filter(|b| {
            b.customer_phone == request.customer_phone
                && b.date == request.date
                && b.status != BookingStatus::Cancelled
        })
        .count();
    if same_customer_today >= policy.daily_limit {
        return Err(RejectionReason::LimitExceeded);
    }

    let end_time = time_from_minute(
        minute_of_day(request.start_time) + i32::from(service.duration_minutes),
    )
    .ok_or(RejectionReason::SlotUnavailable)?;

    Ok(BookingDraft {
        professional_id: request.professional_id,
        service_id: request.service_id,
        customer_name: request.customer_name.clone(),
        customer_phone: request.customer_phone.clone(),
        date: request.date,
        start_time: request.start_time,
        end_time,
        status: policy.initial_status.as_booking_status(),
        notes: request.notes.clone(),
        confirmation_token: Uuid::new_v4().simple().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::test_support::{booking_at, booking_for_phone};
    use crate::scheduling::schedule::DaySchedule;
    use time::macros::{date, time};

    const TODAY: Date = date!(2025 - 06 - 02); // a Monday

    fn all_week() -> WeeklySchedule {
        let hours = DaySchedule {
            start: time!(09:00),
            end: time!(18:00),
            breaks: vec![],
        };
        WeeklySchedule {
            sunday: Some(hours.clone()),
            monday: Some(hours.clone()),
            tuesday: Some(hours.clone()),
            wednesday: Some(hours.clone()),
            thursday: Some(hours.clone()),
            friday: Some(hours.clone()),
            saturday: Some(hours),
        }
    }

    fn haircut() -> Service {
        Service {
            id: Uuid::new_v4(),
            name: "Corte".into(),
            duration_minutes: 60,
            price: 120.0,
            description: None,
        }
    }

    fn request_on(date: Date, start: Time) -> BookingRequest {
        BookingRequest {
            professional_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            customer_name: "Maria Silva".into(),
            customer_phone: "11988887777".into(),
            date,
            start_time: start,
            notes: None,
        }
    }

    fn blocked_override(date: Date) -> DayOverride {
        DayOverride {
            id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            date,
            is_available: false,
            custom_hours: None,
            reason: Some("folga".into()),
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn rejects_past_dates() {
        let req = request_on(TODAY - Duration::days(1), time!(10:00));
        let verdict = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &[], TODAY, &BookingPolicy::default(),
        );
        assert_eq!(verdict.unwrap_err(), RejectionReason::PastDate);
    }

    #[test]
    fn rejects_dates_beyond_the_horizon() {
        // 91 days out against a 90-day horizon.
        let req = request_on(TODAY + Duration::days(91), time!(10:00));
        let verdict = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &[], TODAY, &BookingPolicy::default(),
        );
        assert_eq!(verdict.unwrap_err(), RejectionReason::TooFarFuture);

        // Exactly on the horizon is still accepted.
        let req = request_on(TODAY + Duration::days(90), time!(10:00));
        let verdict = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &[], TODAY, &BookingPolicy::default(),
        );
        assert!(verdict.is_ok());
    }

    #[test]
    fn rejects_blocked_days() {
        let date = TODAY + Duration::days(1);
        let ov = blocked_override(date);
        let req = request_on(date, time!(10:00));
        let verdict = validate_and_prepare(
            &req, &all_week(), &haircut(), Some(&ov), &[], TODAY, &BookingPolicy::default(),
        );
        assert_eq!(verdict.unwrap_err(), RejectionReason::DayBlocked);
    }

    #[test]
    fn rejects_taken_slots() {
        let date = TODAY + Duration::days(1);
        let taken = booking_at(date, time!(10:00), time!(11:00), BookingStatus::Confirmed);
        let req = request_on(date, time!(10:30));
        let verdict = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &[taken], TODAY, &BookingPolicy::default(),
        );
        assert_eq!(verdict.unwrap_err(), RejectionReason::SlotUnavailable);
    }

    #[test]
    fn weekly_day_off_also_reads_as_blocked() {
        let weekly = WeeklySchedule {
            monday: None,
            ..all_week()
        };
        let req = request_on(TODAY + Duration::days(7), time!(10:00));
        let verdict = validate_and_prepare(
            &req, &weekly, &haircut(), None, &[], TODAY, &BookingPolicy::default(),
        );
        assert_eq!(verdict.unwrap_err(), RejectionReason::DayBlocked);
    }

    #[test]
    fn enforces_the_per_phone_daily_limit() {
        let date = TODAY + Duration::days(1);
        let phone = "11988887777";
        let existing: Vec<Booking> = [time!(09:00), time!(11:00), time!(13:00)]
            .into_iter()
            .map(|t| {
                booking_for_phone(date, t, t + Duration::hours(1), phone, BookingStatus::Confirmed)
            })
            .collect();
        let req = request_on(date, time!(15:00));
        let verdict = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &existing, TODAY, &BookingPolicy::default(),
        );
        assert_eq!(verdict.unwrap_err(), RejectionReason::LimitExceeded);
    }

    #[test]
    fn cancelled_bookings_do_not_count_toward_the_limit() {
        let date = TODAY + Duration::days(1);
        let phone = "11988887777";
        let mut existing: Vec<Booking> = [time!(09:00), time!(11:00)]
            .into_iter()
            .map(|t| {
                booking_for_phone(date, t, t + Duration::hours(1), phone, BookingStatus::Confirmed)
            })
            .collect();
        existing.push(booking_for_phone(
            date,
            time!(13:00),
            time!(14:00),
            phone,
            BookingStatus::Cancelled,
        ));
        let req = request_on(date, time!(15:00));
        let verdict = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &existing, TODAY, &BookingPolicy::default(),
        );
        assert!(verdict.is_ok());
    }

    #[test]
    fn accepted_draft_computes_end_time_and_token() {
        let date = TODAY + Duration::days(1);
        let req = request_on(date, time!(10:00));
        let draft = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &[], TODAY, &BookingPolicy::default(),
        )
        .unwrap();
        assert_eq!(draft.end_time, time!(11:00));
        assert_eq!(draft.status, BookingStatus::Confirmed);
        assert!(!draft.confirmation_token.is_empty());

        let again = validate_and_prepare(
            &req, &all_week(), &haircut(), None, &[], TODAY, &BookingPolicy::default(),
        )
        .unwrap();
        assert_ne!(draft.confirmation_token, again.confirmation_token);
    }

    #[test]
    fn initial_status_follows_policy() {
        let policy = BookingPolicy {
            initial_status: InitialBookingStatus::Pending,
            ..BookingPolicy::default()
        };
        let req = request_on(TODAY + Duration::days(1), time!(10:00));
        let draft =
            validate_and_prepare(&req, &all_week(), &haircut(), None, &[], TODAY, &policy).unwrap();
        assert_eq!(draft.status, BookingStatus::Pending);
    }
}
