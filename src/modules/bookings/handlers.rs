use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use time::Date;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{timefmt, Booking, NewBooking, UpdateBookingPayload};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::ProfessionalAuth;
use crate::scheduling::{
    generate_slots, resolve_schedule, validate_and_prepare, BookingRequest, Slot,
};

fn parse_date_param(raw: &str) -> AppResult<Date> {
    timefmt::parse_date(raw)
        .map_err(|_| AppError::Validation(format!("Invalid date: {raw}, expected YYYY-MM-DD")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    professional_id: Option<Uuid>,
    date: Option<String>,
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let date = query.date.as_deref().map(parse_date_param).transpose()?;
    let bookings = state.bookings.list(query.professional_id, date).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .bookings
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn get_booking_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .bookings
        .get_by_token(&token)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<NewBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let professional = state
        .professionals
        .get_by_id(payload.professional_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Professional not found".into()))?;
    let service = professional
        .service(payload.service_id)
        .ok_or_else(|| AppError::NotFound("Service not offered by this professional".into()))?
        .clone();

    // Snapshot reads and the insert happen under the per-professional
    // lock so two concurrent requests cannot both pass validation for
    // the same window.
    let lock = state.booking_lock(professional.id);
    let _guard = lock.lock().await;

    let day_override = state
        .availability
        .get_override(professional.id, payload.date)
        .await?;
    let existing = state
        .bookings
        .list_by_professional_and_date(professional.id, payload.date)
        .await?;

    let request = BookingRequest {
        professional_id: payload.professional_id,
        service_id: payload.service_id,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        date: payload.date,
        start_time: payload.start_time,
        notes: payload.notes,
    };

    let draft = validate_and_prepare(
        &request,
        &professional.working_hours,
        &service,
        day_override.as_ref(),
        &existing,
        state.clock.today(),
        &state.env.booking.policy(),
    )
    .map_err(AppError::Rejected)?;

    let booking = state.bookings.create(draft).await?;
    info!(
        booking_id = %booking.id,
        professional = %professional.name,
        service = %service.name,
        date = %payload.date,
        "booking created"
    );

    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    professional_id: Uuid,
    date: String,
    service_id: Uuid,
}

/// The bookable-times grid for one professional/date/service, computed
/// from the same schedule resolution and availability predicate the
/// booking path uses.
pub async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let date = parse_date_param(&query.date)?;
    let professional = state
        .professionals
        .get_by_id(query.professional_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Professional not found".into()))?;
    let service = professional
        .service(query.service_id)
        .ok_or_else(|| AppError::NotFound("Service not offered by this professional".into()))?;

    let day_override = state
        .availability
        .get_override(professional.id, date)
        .await?;
    let existing = state
        .bookings
        .list_by_professional_and_date(professional.id, date)
        .await?;

    let schedule = resolve_schedule(
        &professional.working_hours,
        day_override.as_ref(),
        date.weekday(),
    );
    let slots = generate_slots(schedule, &existing, service.duration_minutes, date);
    Ok(Json(slots))
}

pub async fn update_booking(
    _auth: ProfessionalAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingPayload>,
) -> AppResult<Json<Booking>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let booking = state
        .bookings
        .update(id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn delete_booking(
    _auth: ProfessionalAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.bookings.delete(id).await? {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    Ok(Json(json!({ "success": true })))
}
