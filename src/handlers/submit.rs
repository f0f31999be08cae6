// handlers/submit.rs - POST /api/submit-application
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::schema::Submission;
use crate::sheets::StoredRecord;
use crate::state::AppState;

/// Intake pipeline: parse, presence-check, log, attempt the append, and
/// respond 200 whether or not persistence happened. A sheet outage must
/// never reject an applicant; only a malformed payload is fatal.
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        tracing::error!(error = %e, "failed to parse submission payload");
        ApiError::internal_server_error("Internal server error")
    })?;

    // Presence pre-check against the shared schema's field list. Full
    // constraint checking already ran in the form renderer.
    let missing: Vec<String> = state
        .schema
        .required_fields()
        .iter()
        .filter(|field| !is_present(body.get(**field)))
        .map(|field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::missing_fields(missing));
    }

    let submission: Submission = serde_json::from_value(body).map_err(|e| {
        tracing::error!(error = %e, "submission payload has unexpected field types");
        ApiError::internal_server_error("Internal server error")
    })?;

    // Audit sink: every submission is recorded here regardless of what the
    // persist attempt does, so a sheet outage never loses the application.
    tracing::info!(
        name = %submission.name,
        phone = submission.phone.as_deref().unwrap_or("-"),
        college = %submission.college,
        year = %submission.year,
        preference1 = %submission.preference1,
        preference2 = %submission.preference2,
        about_yourself = %submission.about_yourself,
        why_join = %submission.why_join,
        resume_link = %submission.resume_link,
        "new application submitted"
    );

    let record = StoredRecord::new(&submission, state.schema.collect_phone());
    match state.store.append_row(record).await {
        Ok(()) => Ok(Json(json!({
            "message": "Application submitted successfully to Google Sheets"
        }))),
        Err(e) => {
            tracing::error!(error = %e, "Google Sheets append failed; application kept in log only");
            Ok(Json(json!({
                "message": "Application received and logged (Google Sheets setup pending)",
                "note": "Your application has been recorded. Please check the setup guide for Google Sheets integration.",
                "debug": { "persistError": e.to_string() }
            })))
        }
    }
}

/// A required field counts as present when it exists, is not null, and is
/// not an empty or whitespace-only string.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
