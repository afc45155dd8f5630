use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A bookable service. The duration drives both the slot stride and the
/// conflict-window length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "duration")]
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: u16,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
