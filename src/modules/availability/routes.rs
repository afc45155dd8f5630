use axum::{
    routing::get,
    Router,
};

use super::handlers::{delete_availability, list_availability, upsert_availability};
use crate::app_state::AppState;

pub fn availability_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_availability)
            .post(upsert_availability)
            .delete(delete_availability),
    )
}
