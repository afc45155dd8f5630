use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::config::Config;
use crate::db::{DynAvailabilityRepository, DynBookingRepository, DynProfessionalRepository};
use crate::scheduling::Clock;

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub professionals: DynProfessionalRepository,
    pub availability: DynAvailabilityRepository,
    pub bookings: DynBookingRepository,
    pub clock: Arc<dyn Clock>,
    booking_locks: Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl AppState {
    pub fn new(
        env: Config,
        professionals: DynProfessionalRepository,
        availability: DynAvailabilityRepository,
        bookings: DynBookingRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            env,
            professionals,
            availability,
            bookings,
            clock,
            booking_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Advisory lock serializing validate+insert per professional, closing
    /// the check-then-act window between reading the bookings snapshot and
    /// writing the new booking. A transactional store would use a unique
    /// constraint or serializable transaction instead.
    pub fn booking_lock(&self, professional_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .booking_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(professional_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
