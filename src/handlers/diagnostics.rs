// handlers/diagnostics.rs - GET /api/test-sheets
use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// Configuration-presence report for operational troubleshooting: which
/// environment inputs were set, plus the non-secret parts of the resolved
/// config. Read-only, no submission involved.
pub async fn test_sheets(State(state): State<Arc<AppState>>) -> Json<Value> {
    let report = &state.config.env_report;

    Json(json!({
        "message": "Google Sheets configuration test",
        "config": {
            "hasServiceAccountEmail": report.has_service_account_email,
            "hasPrivateKey": report.has_private_key,
            "hasApiKey": report.has_api_key,
            "hasSheetsId": report.has_sheets_id,
            "sheetsId": state.config.spreadsheet_id,
            "sheetName": state.config.sheet_name,
        },
        "ready": state.store.is_ready(),
        "status": "Check the config above to see what might be missing"
    }))
}
