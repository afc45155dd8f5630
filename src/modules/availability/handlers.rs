use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use time::Date;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{timefmt, DayOverride, NewDayOverride};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::ProfessionalAuth;

fn parse_date_param(raw: &str) -> AppResult<Date> {
    timefmt::parse_date(raw)
        .map_err(|_| AppError::Validation(format!("Invalid date: {raw}, expected YYYY-MM-DD")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityListQuery {
    professional_id: Option<Uuid>,
    start_date: Option<String>,
    end_date: Option<String>,
}

pub async fn list_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityListQuery>,
) -> AppResult<Json<Vec<DayOverride>>> {
    let range = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => {
            let (start, end) = (parse_date_param(start)?, parse_date_param(end)?);
            if start > end {
                return Err(AppError::Validation(
                    "startDate must not be after endDate".into(),
                ));
            }
            Some((start, end))
        }
        (None, None) => None,
        _ => {
            return Err(AppError::Validation(
                "startDate and endDate must be supplied together".into(),
            ))
        }
    };

    let overrides = state.availability.list(query.professional_id, range).await?;
    Ok(Json(overrides))
}

pub async fn upsert_availability(
    auth: ProfessionalAuth,
    State(state): State<AppState>,
    Json(payload): Json<NewDayOverride>,
) -> AppResult<(StatusCode, Json<DayOverride>)> {
    if auth.professional_id != payload.professional_id {
        return Err(AppError::Authorization(
            "Cannot manage another professional's availability".into(),
        ));
    }
    if let Some(hours) = &payload.custom_hours {
        hours
            .ensure_well_formed()
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }

    let saved = state.availability.upsert(payload).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityDeleteQuery {
    id: Uuid,
}

pub async fn delete_availability(
    _auth: ProfessionalAuth,
    State(state): State<AppState>,
    Query(query): Query<AvailabilityDeleteQuery>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.availability.delete(query.id).await? {
        return Err(AppError::NotFound("Availability not found".into()));
    }
    Ok(Json(json!({ "success": true })))
}
