pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/api/reservations",
            get(handlers::reservations::list_reservations),
        )
        .route(
            "/api/reservations/query",
            post(handlers::reservations::owner_query),
        )
        .route("/api/reviews", get(handlers::reviews::list_reviews))
        .route(
            "/api/reviews/:id/draft",
            post(handlers::reviews::generate_draft).put(handlers::reviews::edit_draft),
        )
        .route(
            "/api/reviews/:id/status",
            post(handlers::reviews::update_status),
        )
        .route("/api/booking/chat", post(handlers::booking::chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
