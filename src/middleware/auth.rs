use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;

/// Extractor for mutation endpoints: `Authorization: Bearer <id>:<pin>`,
/// checked against the professional's stored PIN. Hashing and lockout are
/// deliberately out of scope here.
pub struct ProfessionalAuth {
    pub professional_id: Uuid,
}

impl FromRequestParts<AppState> for ProfessionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".into()))?;

        let credentials = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Expected a bearer token".into()))?;

        let (id_part, pin) = credentials
            .split_once(':')
            .ok_or_else(|| AppError::Authentication("Malformed credentials".into()))?;

        let professional_id = Uuid::parse_str(id_part)
            .map_err(|_| AppError::Authentication("Malformed professional id".into()))?;

        let professional = state
            .professionals
            .get_by_id(professional_id)
            .await?
            .ok_or_else(|| AppError::Authentication("Unknown professional".into()))?;

        if professional.pin.expose_secret() != pin {
            return Err(AppError::Authentication("Invalid PIN".into()));
        }

        Ok(Self { professional_id })
    }
}
