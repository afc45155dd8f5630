use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::timefmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

/// A persisted appointment. Owned by the storage layer; the scheduling
/// engine only ever sees immutable snapshots of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(with = "timefmt::date")]
    pub date: Date,
    #[serde(with = "timefmt::time_hm")]
    pub start_time: Time,
    #[serde(with = "timefmt::time_hm")]
    pub end_time: Time,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub confirmation_token: String,
}

/// Customer-facing creation payload. The end time is not accepted from
/// clients; it is derived from the service duration during validation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub professional_id: Uuid,
    pub service_id: Uuid,
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub customer_name: String,
    #[validate(custom(function = "validate_phone"))]
    pub customer_phone: String,
    #[serde(with = "timefmt::date")]
    pub date: Date,
    #[serde(with = "timefmt::time_hm")]
    pub start_time: Time,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Admin-driven updates: confirm/cancel/complete, or annotate.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingPayload {
    pub status: Option<BookingStatus>,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits_only = phone.chars().all(|c| c.is_ascii_digit());
    if digits_only && (10..=11).contains(&phone.len()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Phone must be 10 or 11 digits".into());
        Err(error)
    }
}
