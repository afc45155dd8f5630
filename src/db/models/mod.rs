mod booking;
mod day_override;
mod professional;
mod service;
pub mod timefmt;

pub use booking::{Booking, BookingStatus, NewBooking, UpdateBookingPayload};
pub use day_override::{DayOverride, NewDayOverride};
pub use professional::Professional;
pub use service::Service;
