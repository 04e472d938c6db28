use crate::api::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// Health check endpoint reporting the database state
///
/// # Endpoint: GET /health
///
/// Returns 200 when the CSV database is loaded and 503 otherwise.
pub(crate) async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let connected = state.db.is_connected().await;
    let records = state.db.record_count().await.unwrap_or(0);

    let (status_code, status) = if connected {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let health_status = serde_json::json!({
        "status": status,
        "database": {
            "connected": connected,
            "records": records,
        },
        "timestamp": chrono::Utc::now()
    });

    (status_code, Json(health_status))
}
