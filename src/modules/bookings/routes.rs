use axum::{
    routing::get,
    Router,
};

use super::handlers::{
    create_booking, delete_booking, get_booking, get_booking_by_token, list_bookings, list_slots,
    update_booking,
};
use crate::app_state::AppState;

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/slots", get(list_slots))
        .route("/confirmation/{token}", get(get_booking_by_token))
        .route(
            "/{id}",
            get(get_booking).patch(update_booking).delete(delete_booking),
        )
}
