// Google Sheets v4 REST client.
//
// Construction resolves the credential mode exactly once and never fails
// the process: anything short of a usable spreadsheet id + credentials
// degrades to an uninitialized client whose operations return
// `SheetsError::NotReady` without a remote call.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use super::{record, SheetStore, SheetsError, StoredRecord};
use crate::config::{Credentials, ServiceConfig};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Bounds every outbound call so a slow remote cannot stall a request.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct GoogleSheetsClient {
    target: Option<Target>,
}

struct Target {
    http: reqwest::Client,
    spreadsheet_id: String,
    sheet_name: String,
    collect_phone: bool,
    auth: AuthMode,
}

enum AuthMode {
    /// Full read/write scope via an RS256-signed OAuth2 JWT grant.
    ServiceAccount { email: String, signing_key: EncodingKey },
    /// Bare API key passed as a query parameter. Development use only.
    ApiKey(String),
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GoogleSheetsClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self { target: Self::initialize(config) }
    }

    fn initialize(config: &ServiceConfig) -> Option<Target> {
        let Some(spreadsheet_id) = config.spreadsheet_id.clone() else {
            tracing::warn!("GOOGLE_SHEETS_ID is not set; submissions will be logged only");
            return None;
        };

        let auth = match &config.credentials {
            Credentials::ServiceAccount { email, private_key } => {
                match EncodingKey::from_rsa_pem(private_key.as_bytes()) {
                    Ok(signing_key) => {
                        tracing::info!("Google Sheets initialized with service account");
                        AuthMode::ServiceAccount { email: email.clone(), signing_key }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "service account private key could not be parsed; submissions will be logged only");
                        return None;
                    }
                }
            }
            Credentials::ApiKey(key) => {
                tracing::info!("Google Sheets initialized with API key");
                AuthMode::ApiKey(key.clone())
            }
            Credentials::None => {
                tracing::warn!("no Google Sheets credentials found; submissions will be logged only");
                return None;
            }
        };

        let http = match reqwest::Client::builder().timeout(REMOTE_TIMEOUT).build() {
            Ok(http) => http,
            Err(e) => {
                tracing::warn!(error = %e, "failed to build HTTP client; submissions will be logged only");
                return None;
            }
        };

        Some(Target { http, spreadsheet_id, sheet_name: config.sheet_name.clone(), collect_phone: config.collect_phone, auth })
    }
}

impl Target {
    fn values_url(&self, range: &str) -> String {
        format!("{}/{}/values/{}", SHEETS_API_BASE, self.spreadsheet_id, range)
    }

    /// Attach credentials to an outgoing request. Service-account mode
    /// mints a fresh access token per call, keeping the client immutable
    /// after construction.
    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, SheetsError> {
        match &self.auth {
            AuthMode::ServiceAccount { email, signing_key } => {
                let now = Utc::now().timestamp();
                let claims = AssertionClaims {
                    iss: email,
                    scope: SCOPE,
                    aud: TOKEN_URL,
                    iat: now,
                    exp: now + 3600,
                };
                let assertion = encode(&Header::new(Algorithm::RS256), &claims, signing_key)?;

                let response = self
                    .http
                    .post(TOKEN_URL)
                    .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(SheetsError::Auth(format!("{}: {}", status, body)));
                }

                let token: TokenResponse = response.json().await?;
                Ok(request.bearer_auth(token.access_token))
            }
            AuthMode::ApiKey(key) => Ok(request.query(&[("key", key.as_str())])),
        }
    }
}

async fn expect_success(response: reqwest::Response) -> Result<(), SheetsError> {
    if response.status().is_success() {
        return Ok(());
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(SheetsError::Remote(format!("{}: {}", status, body)))
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn ensure_header_row(&self) -> Result<(), SheetsError> {
        let target = self.target.as_ref().ok_or(SheetsError::NotReady)?;

        let headers = record::header_row(target.collect_phone);
        let range =
            format!("{}!A1:{}1", target.sheet_name, record::last_column(target.collect_phone));

        // PUT overwrites row 1 in place, so repeated calls never duplicate
        let request = target
            .http
            .put(target.values_url(&range))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [headers] }));
        let request = target.authorize(request).await?;

        let result = expect_success(request.send().await?).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, range = %range, "failed to write sheet header row");
        }
        result
    }

    async fn append_row(&self, record: StoredRecord) -> Result<(), SheetsError> {
        let target = self.target.as_ref().ok_or(SheetsError::NotReady)?;

        let range = format!(
            "{}!A:{}",
            target.sheet_name,
            record::last_column(target.collect_phone)
        );

        let request = target
            .http
            .post(format!("{}:append", target.values_url(&range)))
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({ "values": [record.into_cells()] }));
        let request = target.authorize(request).await?;

        let result = expect_success(request.send().await?).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, range = %range, "failed to append application row");
        }
        result
    }

    fn is_ready(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvReport;
    use crate::schema::Submission;

    fn config_with(spreadsheet_id: Option<&str>, credentials: Credentials) -> ServiceConfig {
        ServiceConfig {
            spreadsheet_id: spreadsheet_id.map(str::to_string),
            sheet_name: "Applications".to_string(),
            credentials,
            collect_phone: true,
            env_report: EnvReport {
                has_service_account_email: false,
                has_private_key: false,
                has_api_key: false,
                has_sheets_id: spreadsheet_id.is_some(),
            },
        }
    }

    fn sample_submission() -> Submission {
        Submission {
            name: "Ann Lee".to_string(),
            phone: Some("9876543210".to_string()),
            college: "XYZ College".to_string(),
            year: "FY".to_string(),
            preference1: "tech".to_string(),
            preference2: "design".to_string(),
            about_yourself: "I love data.".to_string(),
            why_join: "To learn and contribute.".to_string(),
            resume_link: "https://drive.google.com/x".to_string(),
        }
    }

    #[test]
    fn no_credentials_degrades_to_not_ready() {
        let client = GoogleSheetsClient::new(&config_with(Some("sheet-id"), Credentials::None));
        assert!(!client.is_ready());
    }

    #[test]
    fn missing_spreadsheet_id_degrades_to_not_ready() {
        let client = GoogleSheetsClient::new(&config_with(
            None,
            Credentials::ApiKey("api-key".to_string()),
        ));
        assert!(!client.is_ready());
    }

    #[test]
    fn unparseable_private_key_degrades_to_not_ready() {
        let client = GoogleSheetsClient::new(&config_with(
            Some("sheet-id"),
            Credentials::ServiceAccount {
                email: "svc@example.iam.gserviceaccount.com".to_string(),
                private_key: "not a pem".to_string(),
            },
        ));
        assert!(!client.is_ready());
    }

    #[test]
    fn api_key_mode_is_ready() {
        let client = GoogleSheetsClient::new(&config_with(
            Some("sheet-id"),
            Credentials::ApiKey("api-key".to_string()),
        ));
        assert!(client.is_ready());
    }

    #[tokio::test]
    async fn not_ready_operations_fail_fast() {
        let client = GoogleSheetsClient::new(&config_with(Some("sheet-id"), Credentials::None));

        let header = client.ensure_header_row().await;
        assert!(matches!(header, Err(SheetsError::NotReady)));

        let record = StoredRecord::new(&sample_submission(), true);
        let append = client.append_row(record).await;
        assert!(matches!(append, Err(SheetsError::NotReady)));
    }
}
