#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use datazen_intake_api::config::{Credentials, EnvReport, ServiceConfig};
use datazen_intake_api::sheets::{header_row, SheetStore, SheetsError, StoredRecord};
use datazen_intake_api::state::AppState;

/// In-memory stand-in for the remote sheet. Row 0 is whatever the last
/// header write put there; appends always go after the last row, matching
/// the remote append semantics.
pub struct MemorySheet {
    ready: bool,
    fail_remote: bool,
    collect_phone: bool,
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemorySheet {
    pub fn ready(collect_phone: bool) -> Arc<Self> {
        Arc::new(Self { ready: true, fail_remote: false, collect_phone, rows: Mutex::new(Vec::new()) })
    }

    /// Initialized client whose remote calls all fail.
    pub fn failing(collect_phone: bool) -> Arc<Self> {
        Arc::new(Self { ready: true, fail_remote: true, collect_phone, rows: Mutex::new(Vec::new()) })
    }

    /// Client that never found credentials.
    pub fn offline(collect_phone: bool) -> Arc<Self> {
        Arc::new(Self { ready: false, fail_remote: false, collect_phone, rows: Mutex::new(Vec::new()) })
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SheetStore for MemorySheet {
    async fn ensure_header_row(&self) -> Result<(), SheetsError> {
        if !self.ready {
            return Err(SheetsError::NotReady);
        }
        if self.fail_remote {
            return Err(SheetsError::Remote("503: backend unavailable".to_string()));
        }

        let header: Vec<String> =
            header_row(self.collect_phone).into_iter().map(str::to_string).collect();
        let mut rows = self.rows.lock().unwrap();
        if rows.is_empty() {
            rows.push(header);
        } else {
            rows[0] = header;
        }
        Ok(())
    }

    async fn append_row(&self, record: StoredRecord) -> Result<(), SheetsError> {
        if !self.ready {
            return Err(SheetsError::NotReady);
        }
        if self.fail_remote {
            return Err(SheetsError::Remote("503: backend unavailable".to_string()));
        }

        self.rows.lock().unwrap().push(record.into_cells());
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

pub fn test_config(collect_phone: bool) -> ServiceConfig {
    ServiceConfig {
        spreadsheet_id: Some("test-sheet-id".to_string()),
        sheet_name: "Applications".to_string(),
        credentials: Credentials::ApiKey("test-api-key".to_string()),
        collect_phone,
        env_report: EnvReport {
            has_service_account_email: false,
            has_private_key: false,
            has_api_key: true,
            has_sheets_id: true,
        },
    }
}

pub fn app_with(store: Arc<MemorySheet>, collect_phone: bool) -> Router {
    datazen_intake_api::app(AppState::new(test_config(collect_phone), store))
}

/// Complete, valid submission used across the test suite.
pub fn ann_lee() -> Value {
    json!({
        "name": "Ann Lee",
        "phone": "9876543210",
        "college": "XYZ College",
        "year": "FY",
        "preference1": "tech",
        "preference2": "design",
        "aboutYourself": "I love data.",
        "whyJoin": "To learn and contribute.",
        "resumeLink": "https://drive.google.com/x"
    })
}

pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let raw = body.map(|v| v.to_string());
    send_raw(app, method, uri, raw).await
}

pub async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(raw) => builder.header("content-type", "application/json").body(Body::from(raw))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}
