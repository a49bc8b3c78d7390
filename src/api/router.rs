use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handler::{self, RelayState};

pub mod paths {
    pub const ROOT: &str = "/";
    pub const SUMMARIZE: &str = "/summarize";
}

/// Assembles the relay routes with tracing and CORS layers.
pub fn build_router(state: RelayState, cors_origins: Option<&[String]>) -> Router {
    Router::new()
        .route(paths::ROOT, get(handler::root))
        .route(paths::SUMMARIZE, post(handler::summarize))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

/// Permissive when no origins are configured; otherwise only the listed
/// origins are allowed.
pub fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
