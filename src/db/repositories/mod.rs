mod availability_repository;
mod booking_repository;
mod professional_repository;

use std::sync::Arc;

pub use availability_repository::{AvailabilityRepository, InMemoryAvailabilityRepository};
pub use booking_repository::{BookingRepository, InMemoryBookingRepository};
pub use professional_repository::{InMemoryProfessionalRepository, ProfessionalRepository};

pub type DynProfessionalRepository = Arc<dyn ProfessionalRepository>;
pub type DynAvailabilityRepository = Arc<dyn AvailabilityRepository>;
pub type DynBookingRepository = Arc<dyn BookingRepository>;
