//! Web support for the `Routes`, `Middleware` and `JWTAuth` demos: a
//! loopback server for an `axum::Router`, JWT helpers, and a client.

pub mod jwt;
pub mod server;

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub use server::{spawn, RunningServer, ServerError};

/// `{"error": message}` with `status`.
pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// HTTP client for talking to a demo server on loopback.
///
/// Proxies are disabled: a proxy from the environment must never see
/// loopback traffic.
pub fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
}

/// A current-thread runtime for one demo call. Dropped before the demo
/// returns.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body_is_json() {
        let reply = error(StatusCode::NOT_FOUND, "gone");
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(reply.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "gone" }));
    }
}
