mod error;
pub mod models;
pub mod repositories;
pub mod seed;

use std::sync::Arc;

pub use error::StorageError;
pub use repositories::{
    DynAvailabilityRepository, DynBookingRepository, DynProfessionalRepository,
};

use repositories::{
    InMemoryAvailabilityRepository, InMemoryBookingRepository, InMemoryProfessionalRepository,
};

/// Builds the in-memory reference stores seeded with the demo roster.
/// Swapping in a SQL-backed implementation only touches this function.
pub fn init_stores() -> (
    DynProfessionalRepository,
    DynAvailabilityRepository,
    DynBookingRepository,
) {
    (
        Arc::new(InMemoryProfessionalRepository::new(seed::demo_professionals())),
        Arc::new(InMemoryAvailabilityRepository::new()),
        Arc::new(InMemoryBookingRepository::new()),
    )
}
