//! Middleware chains: a request logger, panic recovery, a request-id
//! header, and a group-only API key check.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{info, warn};

use super::panic_recover::{payload_message, ExpectedPanics};
use crate::web;

const REQUEST_ID: &str = "x-request-id";
const API_KEY: &str = "x-api-key";
const API_KEY_VALUE: &str = "let-me-in";
const PANIC_MESSAGE: &str = "something went badly wrong";

#[derive(Debug, Clone)]
struct RequestId(String);

/// Logs method, path, status and latency once the rest of the chain returns.
async fn logger(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let reply = next.run(req).await;
    info!(%method, %path, status = reply.status().as_u16(), elapsed = ?started.elapsed(), "request");
    println!("  [logger] {method} {path} -> {}", reply.status().as_u16());
    reply
}

/// Turns a panicking handler into a 500 reply.
fn on_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let msg = payload_message(&*payload);
    warn!(panic = %msg, "handler panicked");
    println!("  [recovery] caught panic: {msg}");
    web::error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// Reuses the caller's `x-request-id` or assigns a new one, and echoes it
/// on the response.
async fn request_id(State(counter): State<Arc<AtomicU64>>, mut req: Request, next: Next) -> Response {
    let given = req
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let id = given.unwrap_or_else(|| format!("req-{}", counter.fetch_add(1, Ordering::SeqCst) + 1));

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut reply = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        reply.headers_mut().insert(REQUEST_ID, value);
    }
    reply
}

async fn api_key(req: Request, next: Next) -> Response {
    let key = req.headers().get(API_KEY).and_then(|v| v.to_str().ok());
    if key == Some(API_KEY_VALUE) {
        next.run(req).await
    } else {
        web::error(StatusCode::UNAUTHORIZED, "missing or wrong api key")
    }
}

async fn hello(Extension(RequestId(id)): Extension<RequestId>) -> String {
    format!("hello, request {id}")
}

async fn explode() -> &'static str {
    panic!("{PANIC_MESSAGE}")
}

fn build_router() -> Router {
    let admin = Router::new()
        .route("/stats", get(|| async { "42 requests served" }))
        .route_layer(middleware::from_fn(api_key));

    // The last layer added runs first: logger -> recovery -> request-id.
    Router::new()
        .route("/hello", get(hello))
        .route("/panic", get(explode))
        .nest("/admin", admin)
        .layer(middleware::from_fn_with_state(Arc::new(AtomicU64::new(0)), request_id))
        .layer(CatchPanicLayer::custom(on_panic))
        .layer(middleware::from_fn(logger))
}

async fn exercise(router: Router) -> Result<(), Box<dyn std::error::Error>> {
    let server = web::spawn(router).await?;
    let http = web::client()?;

    let requests: [(&str, &[(&str, &str)]); 5] = [
        ("/hello", &[]),
        ("/hello", &[(REQUEST_ID, "client-chosen-id")]),
        ("/panic", &[]),
        ("/admin/stats", &[]),
        ("/admin/stats", &[(API_KEY, API_KEY_VALUE)]),
    ];

    for (path, headers) in requests {
        let mut request = http.get(server.url(path));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let id = response
            .headers()
            .get(REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let body = response.text().await?;
        println!("  GET {path:<14} -> {status} id={id} {body}\n");
    }

    server.shutdown().await?;
    Ok(())
}

pub fn run() {
    println!("=== Middleware ===\n");

    let router = build_router();
    println!("--- Chain: logger -> recovery -> request-id -> handler ---\n");

    let result = {
        // Only the /panic route's panic is kept off stderr.
        let _quiet = ExpectedPanics::new(&[PANIC_MESSAGE]);
        web::runtime()
            .map_err(Into::into)
            .and_then(|rt| rt.block_on(exercise(router)))
    };

    if let Err(err) = result {
        println!("error: {err}");
        return;
    }

    println!("=== Key Points ===");
    println!("1. Each middleware decides whether and when to call next");
    println!("2. Code after next.run sees the finished reply");
    println!("3. Layers on a nested router only wrap the routes inside it");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    fn get_request(path: &str, header: Option<(&'static str, &'static str)>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri(path);
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_request_id_assigned_and_echoed() {
        let router = build_router();
        let first = router.clone().oneshot(get_request("/hello", None)).await.unwrap();
        let given = router
            .oneshot(get_request("/hello", Some((REQUEST_ID, "abc"))))
            .await
            .unwrap();

        assert_eq!(first.headers()[REQUEST_ID], "req-1");
        assert_eq!(given.headers()[REQUEST_ID], "abc");
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_500() {
        let reply = build_router().oneshot(get_request("/panic", None)).await.unwrap();
        assert_eq!(reply.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // request-id runs inside recovery, so the panic unwound past it.
        assert!(reply.headers().get(REQUEST_ID).is_none());
    }

    #[tokio::test]
    async fn test_api_key_only_guards_group() {
        let router = build_router();
        let status = |req: axum::http::Request<Body>| {
            let router = router.clone();
            async move { router.oneshot(req).await.unwrap().status() }
        };

        assert_eq!(status(get_request("/admin/stats", None)).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(get_request("/admin/stats", Some((API_KEY, API_KEY_VALUE)))).await,
            StatusCode::OK
        );
        assert_eq!(status(get_request("/hello", None)).await, StatusCode::OK);
    }
}
