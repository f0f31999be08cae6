// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with the wire shapes the form renderer expects.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - required submission fields absent or empty
    MissingFields(Vec<String>),

    // 500 Internal Server Error - malformed payload or unexpected fault
    InternalServerError { error: String, details: Option<String> },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingFields(_) => 400,
            ApiError::InternalServerError { .. } => 500,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::MissingFields(fields) => json!({
                "error": "Missing required fields",
                "missingFields": fields,
            }),
            ApiError::InternalServerError { error, details } => {
                let mut response = json!({ "error": error });
                if let Some(details) = details {
                    response["details"] = json!(details);
                }
                response
            }
        }
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        ApiError::MissingFields(fields)
    }

    pub fn internal_server_error(error: impl Into<String>) -> Self {
        ApiError::InternalServerError { error: error.into(), details: None }
    }

    pub fn internal_server_error_with_details(
        error: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ApiError::InternalServerError { error: error.into(), details: Some(details.into()) }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            ApiError::InternalServerError { error, .. } => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
