// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{analytics_handler, chat_handler, setup_handler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/setup/{company_id}", post(setup_handler))
        .route("/analytics/{company_id}", get(analytics_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        // The widget is embedded on arbitrary host pages.
        .layer(CorsLayer::very_permissive())
}
