use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use crate::AppState;

pub async fn api_health(State(app_state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, database) = match app_state.db.health_check().await {
        Ok(()) => (StatusCode::OK, "ok".to_string()),
        Err(e) => {
            tracing::warn!("⚠️ HEALTH: Store check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    };

    let overall = if status == StatusCode::OK { "healthy" } else { "degraded" };

    (status, Json(json!({
        "status": overall,
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "listingOrder": app_state.config.listing_order.as_str(),
        "store": {
            "backend": app_state.db.question_repo.backend(),
            "status": database
        }
    })))
}
