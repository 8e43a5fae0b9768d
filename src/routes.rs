//! Route table.
//!
//! Pages render HTML; everything under `/api` is JSON and carries the fixed
//! cross-origin header set, error responses included.

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue},
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::handlers::*;
use crate::state::AppState;

const ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Headers every API response carries.
pub fn api_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ),
    ]
}

fn api_router() -> Router<Arc<AppState>> {
    let mut router = Router::new()
        .route("/api/hubs", get(api_list_hubs).options(api_hubs_options))
        .route("/api/analytics/regions", get(api_region_breakdown))
        .route("/api/analytics/status", get(api_status_breakdown))
        .route("/api/analytics/services", get(api_services_breakdown))
        .route("/api/live-stats", get(api_live_stats));

    for (name, value) in api_headers() {
        router = router.layer(SetResponseHeaderLayer::overriding(name, value));
    }
    router
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/hubs", get(hubs_page))
        .route("/analytics", get(analytics))
        .route("/projects", get(projects))
        .route("/solutions", get(solutions))
        .route("/content", get(content_library))
        .route("/impact", get(impact))
        .route("/education", get(education))
        .route("/connect", get(connect))
        .merge(api_router())
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
