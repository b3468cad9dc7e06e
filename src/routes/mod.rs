pub mod vehicle_routes;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Router completo de la API, sin capas de middleware
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(vehicle_routes::create_vehicle_router())
        .with_state(state)
}

/// Health check simple
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vehicle-inventory",
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
