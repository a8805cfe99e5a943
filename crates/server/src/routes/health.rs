use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::OnceLock;
use std::time::Instant;

/// Global server start time for uptime calculation
fn server_start() -> Instant {
    static START: OnceLock<Instant> = OnceLock::new();
    *START.get_or_init(Instant::now)
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "textveil-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": server_start().elapsed().as_secs(),
    }))
}
