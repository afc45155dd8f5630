use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::timefmt;
use crate::scheduling::DaySchedule;

/// A date-specific exception to the weekly schedule. One override exists
/// per (professional, date); writes are upserts. `is_available = false`
/// blocks the day outright; custom hours replace the weekly entry for
/// that date only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOverride {
    pub id: Uuid,
    pub professional_id: Uuid,
    #[serde(with = "timefmt::date")]
    pub date: Date,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_hours: Option<DaySchedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDayOverride {
    pub professional_id: Uuid,
    #[serde(with = "timefmt::date")]
    pub date: Date,
    pub is_available: bool,
    #[serde(default)]
    pub custom_hours: Option<DaySchedule>,
    #[serde(default)]
    pub reason: Option<String>,
}
