pub mod api;
pub mod questions;
pub mod views;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::auth::middleware::restore_user;
use crate::AppState;

pub fn create_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::api_health))
        .nest("/questions", questions::routes())
        .layer(middleware::from_fn_with_state(app_state.clone(), restore_user))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
