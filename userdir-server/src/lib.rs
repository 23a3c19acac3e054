pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod queries;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub struct AppState {
    pub db: Arc<database::ServerDatabase>,
    /// Page size for the user listing
    pub total_on_page: u32,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users/", get(api::list_users))
        .route("/users/create/", post(api::create_user))
        .route("/users/:id/", get(api::get_user))
        .route("/users/:id/update/", patch(api::update_user))
        .route("/users/:id/delete/", delete(api::delete_user))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
