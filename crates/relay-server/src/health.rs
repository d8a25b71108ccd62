use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; the engines are loaded before the listener binds
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
