//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the workout routes under `/api/workouts`, the
//! health probe, and the shared layers (auth, CORS, tracing, timeout).

pub mod middleware;
pub mod workout;

use std::time::Duration;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use workout::{workout_routes, WorkoutHandlers};

/// Cross-cutting settings for the assembled router.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    /// Allowed origins; empty or `*` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full application router.
pub fn app_router(handlers: WorkoutHandlers, validator: AuthState, options: &RouterOptions) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/workouts", workout_routes(handlers))
        .layer(from_fn_with_state(validator, auth_middleware))
        .layer(cors_layer(&options.cors_origins))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}
