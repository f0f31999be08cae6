// handlers/init_sheet.rs - GET|POST /api/init-sheet
use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Write the fixed header tuple into row 1 of the configured sheet.
/// Overwrites in place, so calling this repeatedly is safe.
pub async fn init_sheet(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    tracing::info!("sheet header initialization requested");

    match state.store.ensure_header_row().await {
        Ok(()) => Ok(Json(json!({
            "message": "Sheet headers initialized successfully"
        }))),
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize sheet headers");
            Err(ApiError::internal_server_error_with_details(
                "Failed to initialize sheet headers",
                e.to_string(),
            ))
        }
    }
}
