use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Time, Weekday};

use crate::db::models::timefmt;
use crate::db::models::DayOverride;

/// A sub-interval of a working day, half-open in spirit: a break
/// `12:00-13:00` leaves both the 11:00-12:00 and 13:00-14:00 slots free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "timefmt::time_hm")]
    pub start: Time,
    #[serde(with = "timefmt::time_hm")]
    pub end: Time,
}

/// Working hours for a single day: opening interval plus breaks during
/// which no appointment may start or run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(with = "timefmt::time_hm")]
    pub start: Time,
    #[serde(with = "timefmt::time_hm")]
    pub end: Time,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaks: Vec<TimeRange>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("day start must be before day end")]
    InvertedHours,
    #[error("break {0}-{1} falls outside working hours")]
    BreakOutOfBounds(String, String),
    #[error("break {0}-{1} is inverted or overlaps the previous break")]
    MalformedBreaks(String, String),
}

impl DaySchedule {
    /// Boundary check for externally supplied hours (override upsert, seed
    /// data). The pure engine assumes these invariants hold.
    pub fn ensure_well_formed(&self) -> Result<(), ScheduleError> {
        if self.start >= self.end {
            return Err(ScheduleError::InvertedHours);
        }
        let mut previous_end = self.start;
        for range in &self.breaks {
            if range.start >= range.end {
                return Err(ScheduleError::MalformedBreaks(
                    range.start.to_string(),
                    range.end.to_string(),
                ));
            }
            if range.start < self.start || range.end > self.end {
                return Err(ScheduleError::BreakOutOfBounds(
                    range.start.to_string(),
                    range.end.to_string(),
                ));
            }
            if range.start < previous_end {
                return Err(ScheduleError::MalformedBreaks(
                    range.start.to_string(),
                    range.end.to_string(),
                ));
            }
            previous_end = range.end;
        }
        Ok(())
    }
}

/// Recurring weekly working hours. `None` means the professional never
/// works that weekday. Day names exist only in the JSON representation;
/// lookups go through [`WeeklySchedule::day`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DaySchedule>,
}

impl WeeklySchedule {
    pub fn day(&self, weekday: Weekday) -> Option<&DaySchedule> {
        match weekday {
            Weekday::Sunday => self.sunday.as_ref(),
            Weekday::Monday => self.monday.as_ref(),
            Weekday::Tuesday => self.tuesday.as_ref(),
            Weekday::Wednesday => self.wednesday.as_ref(),
            Weekday::Thursday => self.thursday.as_ref(),
            Weekday::Friday => self.friday.as_ref(),
            Weekday::Saturday => self.saturday.as_ref(),
        }
    }
}

/// Resolves the effective working hours for one date. Precedence:
/// a blocking override wins outright, custom hours replace the weekly
/// entry wholesale, and an override that merely confirms availability
/// falls through to the weekly default.
///
/// Both slot generation and booking validation must go through this one
/// resolution so they share a single view of "is this day open".
pub fn resolve_schedule<'a>(
    weekly: &'a WeeklySchedule,
    day_override: Option<&'a DayOverride>,
    weekday: Weekday,
) -> Option<&'a DaySchedule> {
    match day_override {
        Some(ov) if !ov.is_available => None,
        Some(ov) => ov.custom_hours.as_ref().or_else(|| weekly.day(weekday)),
        None => weekly.day(weekday),
    }
}
