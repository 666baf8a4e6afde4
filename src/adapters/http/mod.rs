//! HTTP adapters - REST API implementations.
//!
//! - `middleware` - bearer token authentication
//! - `training` - session, chat, hint and completion endpoints

pub mod middleware;
pub mod training;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};

pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use training::{handle_training_error, training_routes, TrainingHandlers};

/// Full API router: training routes behind authentication plus a health probe.
pub fn api_router(handlers: TrainingHandlers, auth: AuthState) -> Router {
    Router::new()
        .nest(
            "/api/sessions",
            training_routes(handlers).layer(from_fn_with_state(auth, auth_middleware)),
        )
        .route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
