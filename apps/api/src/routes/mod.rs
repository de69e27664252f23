pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::airport::handlers as airport;
use crate::community::handlers as community;
use crate::congestion::handlers as congestion;
use crate::parking::handlers as parking;
use crate::state::AppState;
use crate::travel_kit::handlers as travel_kit;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Airport congestion
        .route("/api/v1/congestion", get(congestion::handle_board))
        .route("/api/v1/congestion/slots", get(congestion::handle_slots))
        .route("/api/v1/congestion/hourly", get(congestion::handle_hourly))
        .route("/api/v1/congestion/status", get(congestion::handle_status))
        .route("/api/v1/parking", get(parking::handle_parking))
        .route("/api/v1/airport/facilities", get(airport::handle_facilities))
        .route("/api/v1/airport/airlines", get(airport::handle_airlines))
        // Community board
        .route(
            "/api/v1/posts",
            get(community::handle_list_posts).post(community::handle_create_post),
        )
        .route(
            "/api/v1/posts/:id",
            get(community::handle_get_post).delete(community::handle_delete_post),
        )
        .route("/api/v1/posts/:id/views", post(community::handle_record_view))
        .route("/api/v1/posts/:id/like", post(community::handle_toggle_like))
        .route("/api/v1/posts/:id/comments", post(community::handle_add_comment))
        .route(
            "/api/v1/posts/:id/comments/:comment_id",
            delete(community::handle_delete_comment),
        )
        .route("/api/v1/countries", get(community::handle_countries))
        // Travel kit
        .route(
            "/api/v1/travel-kit/packing",
            get(travel_kit::handle_list_packing).post(travel_kit::handle_add_packing_item),
        )
        .route(
            "/api/v1/travel-kit/packing/:item_id",
            patch(travel_kit::handle_toggle_packing_item)
                .delete(travel_kit::handle_delete_packing_item),
        )
        .route(
            "/api/v1/travel-kit/advisories",
            get(travel_kit::handle_advisories),
        )
        .with_state(state)
}
