// Spreadsheet store abstraction.
//
// The intake pipeline only ever needs two operations against the remote
// tabular store, so the seam is a small capability trait. The production
// implementation is the Google Sheets REST client in `google`; tests swap
// in an in-memory sheet.

pub mod google;
pub mod record;

use async_trait::async_trait;
use thiserror::Error;

pub use record::{header_row, StoredRecord};

#[derive(Debug, Error)]
pub enum SheetsError {
    /// No usable credentials or spreadsheet id at construction; operations
    /// fail fast without a remote call.
    #[error("Sheets client not initialized - check credentials and GOOGLE_SHEETS_ID")]
    NotReady,

    #[error("token exchange failed: {0}")]
    Auth(String),

    #[error("failed to sign auth assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Append-only tabular store holding one header row plus one row per
/// application. Implementations are single-shot: no batching, no retries,
/// no client-side rate limiting. Errors are captured for logging by the
/// caller and never escalate past the handler boundary.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Overwrite row 1 with the fixed header tuple. Idempotent.
    async fn ensure_header_row(&self) -> Result<(), SheetsError>;

    /// Append one record after the last row. Never touches existing rows.
    async fn append_row(&self, record: StoredRecord) -> Result<(), SheetsError>;

    /// Whether construction found usable credentials and a spreadsheet id.
    fn is_ready(&self) -> bool;
}
