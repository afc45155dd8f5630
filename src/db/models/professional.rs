use secrecy::SecretString;
use serde::Serialize;
use uuid::Uuid;

use super::Service;
use crate::scheduling::WeeklySchedule;

/// A professional and the recurring schedule bookings are checked
/// against. The PIN backs the bearer header on mutation endpoints and is
/// never serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub specialties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub working_hours: WeeklySchedule,
    pub services_offered: Vec<Service>,
    #[serde(skip_serializing)]
    pub pin: SecretString,
}

impl Professional {
    pub fn service(&self, service_id: Uuid) -> Option<&Service> {
        self.services_offered.iter().find(|s| s.id == service_id)
    }
}
