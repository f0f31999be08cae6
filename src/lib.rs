pub mod config;
pub mod error;
pub mod handlers;
pub mod schema;
pub mod sheets;
pub mod state;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router. Kept in the library so integration tests
/// can drive it in-process.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Intake pipeline
        .route("/api/submit-application", post(handlers::submit::submit_application))
        // Sheet maintenance; GET kept so it can be triggered from a browser
        .route(
            "/api/init-sheet",
            get(handlers::init_sheet::init_sheet).post(handlers::init_sheet::init_sheet),
        )
        // Diagnostics
        .route("/api/test-sheets", get(handlers::diagnostics::test_sheets))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "DataZen Intake API",
        "version": version,
        "description": "Recruitment application intake backed by Google Sheets",
        "endpoints": {
            "submit": "POST /api/submit-application",
            "init_sheet": "GET|POST /api/init-sheet",
            "diagnostics": "GET /api/test-sheets",
        }
    }))
}

/// Always 200: degraded persistence is reported but does not make the
/// service unhealthy, since submissions still land in the log.
async fn health(State(state): State<Arc<AppState>>) -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "sheets": if state.store.is_ready() { "ready" } else { "degraded" },
    }))
}
