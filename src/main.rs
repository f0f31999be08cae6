use std::sync::Arc;

use datazen_intake_api::config::ServiceConfig;
use datazen_intake_api::sheets::google::GoogleSheetsClient;
use datazen_intake_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up the Google Sheets settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Resolve configuration and build the sheets client exactly once;
    // everything downstream sees them read-only through AppState.
    let config = ServiceConfig::from_env();
    tracing::info!(
        sheet_name = %config.sheet_name,
        collect_phone = config.collect_phone,
        "starting DataZen intake API"
    );

    let store = Arc::new(GoogleSheetsClient::new(&config));
    let state = AppState::new(config, store);
    let app = datazen_intake_api::app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("INTAKE_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("DataZen intake API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
