//! JWT authentication: a login route that issues HS256 tokens and an
//! `/admin` group guarded by bearer-token and role middleware.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::DemoConfig;
use crate::web::jwt::{now_secs, require_auth, require_role, Claims, JwtKeys};
use crate::web;

#[derive(Debug, Deserialize)]
struct Login {
    username: String,
    password: String,
}

/// username, password, role
const ACCOUNTS: [(&str, &str, &str); 2] = [("alice", "wonderland", "admin"), ("bob", "builder", "viewer")];

async fn login(State(keys): State<Arc<JwtKeys>>, Json(login): Json<Login>) -> Result<Json<Value>, Response> {
    let account = ACCOUNTS
        .iter()
        .find(|(user, pass, _)| *user == login.username && *pass == login.password);
    let Some((user, _, role)) = account else {
        return Err(web::error(StatusCode::UNAUTHORIZED, "invalid credentials"));
    };
    let token = keys
        .issue(user, role)
        .map_err(|err| web::error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    Ok(Json(json!({ "token": token, "expires_in": keys.ttl().as_secs() })))
}

async fn dashboard(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({ "message": format!("welcome, {}", claims.sub), "role": claims.role }))
}

fn build_router(keys: Arc<JwtKeys>) -> Router {
    // route_layer: the last one added runs first, so auth precedes the role check.
    let admin = Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(from_fn_with_state("admin", require_role))
        .route_layer(from_fn_with_state(Arc::clone(&keys), require_auth));

    Router::new()
        .route("/login", post(login))
        .nest("/admin", admin)
        .with_state(keys)
}

/// A correctly signed token whose expiry is already in the past.
fn expired_token(keys: &JwtKeys) -> Result<String, web::jwt::AuthError> {
    let now = now_secs();
    keys.sign(&Claims {
        sub: "alice".to_string(),
        role: "admin".to_string(),
        iat: now.saturating_sub(2 * 3600),
        exp: now.saturating_sub(3600),
    })
}

async fn log_in(http: &reqwest::Client, url: &str, user: &str, pass: &str) -> Result<Option<String>, reqwest::Error> {
    let response = http
        .post(url)
        .json(&json!({ "username": user, "password": pass }))
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    println!("  login {user:<6} -> {} {body}", status.as_u16());
    Ok(body.get("token").and_then(|t| t.as_str()).map(str::to_string))
}

async fn exercise(router: Router, keys: Arc<JwtKeys>) -> Result<(), Box<dyn std::error::Error>> {
    let server = web::spawn(router).await?;
    let http = web::client()?;
    let login_url = server.url("/login");

    println!("--- Login ---");
    let admin_token = log_in(&http, &login_url, "alice", "wonderland").await?;
    let viewer_token = log_in(&http, &login_url, "bob", "builder").await?;
    log_in(&http, &login_url, "alice", "guess").await?;

    println!("\n--- Protected route ---");
    let cases = [
        ("no token", None),
        ("garbage token", Some("not.a.jwt".to_string())),
        ("expired token", Some(expired_token(&keys)?)),
        ("viewer token", viewer_token),
        ("admin token", admin_token),
    ];
    for (label, token) in cases {
        let mut request = http.get(server.url("/admin/dashboard"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        println!("  {label:<14} -> {status} {body}");
    }

    server.shutdown().await?;
    Ok(())
}

pub fn run() {
    println!("=== JWTAuth ===\n");

    let config = DemoConfig::from_env();
    let keys = Arc::new(JwtKeys::from_secret(config.jwt_secret.as_bytes(), config.token_ttl));
    println!("token lifetime: {}s\n", keys.ttl().as_secs());

    let router = build_router(Arc::clone(&keys));
    let result = web::runtime()
        .map_err(Into::into)
        .and_then(|rt| rt.block_on(exercise(router, keys)));
    if let Err(err) = result {
        println!("error: {err}");
        return;
    }

    println!("\n=== Key Points ===");
    println!("1. The server signs claims; clients send them back as a bearer token");
    println!("2. Verification checks the signature and the exp claim");
    println!("3. Authentication (401) and authorization (403) are separate steps");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TTL_SECS;
    use axum::body::Body;
    use axum::http::header::AUTHORIZATION;
    use axum::http::{Method, Request};
    use std::time::Duration;
    use tower::ServiceExt;

    fn keys() -> Arc<JwtKeys> {
        Arc::new(JwtKeys::from_secret(b"demo-test", Duration::from_secs(300)))
    }

    async fn post_login(router: &Router, body: &'static str) -> Response {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        router.clone().oneshot(req).await.unwrap()
    }

    async fn dashboard_status(router: &Router, token: Option<String>) -> StatusCode {
        let mut req = Request::builder().uri("/admin/dashboard");
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        router.clone().oneshot(req.body(Body::empty()).unwrap()).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let keys = keys();
        let router = build_router(Arc::clone(&keys));
        let reply = post_login(&router, r#"{"username":"alice","password":"wonderland"}"#).await;
        assert_eq!(reply.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(reply.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let claims = keys.verify(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_bad_credentials_rejected() {
        let router = build_router(keys());
        let reply = post_login(&router, r#"{"username":"alice","password":"nope"}"#).await;
        assert_eq!(reply.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_statuses() {
        let keys = keys();
        let router = build_router(Arc::clone(&keys));

        assert_eq!(dashboard_status(&router, None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(dashboard_status(&router, Some("junk".into())).await, StatusCode::UNAUTHORIZED);
        let expired = expired_token(&keys).unwrap();
        assert_eq!(dashboard_status(&router, Some(expired)).await, StatusCode::UNAUTHORIZED);
        let viewer = keys.issue("bob", "viewer").unwrap();
        assert_eq!(dashboard_status(&router, Some(viewer)).await, StatusCode::FORBIDDEN);
        let admin = keys.issue("alice", "admin").unwrap();
        assert_eq!(dashboard_status(&router, Some(admin)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_expired_token_rejected_even_with_longest_ttl() {
        let keys = Arc::new(JwtKeys::from_secret(b"demo-test", Duration::from_secs(MAX_TTL_SECS)));
        let router = build_router(Arc::clone(&keys));
        let expired = expired_token(&keys).unwrap();
        assert_eq!(dashboard_status(&router, Some(expired)).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_with_overflowing_ttl_is_500_not_panic() {
        let keys = Arc::new(JwtKeys::from_secret(b"demo-test", Duration::from_secs(u64::MAX)));
        let router = build_router(keys);
        let reply = post_login(&router, r#"{"username":"alice","password":"wonderland"}"#).await;
        assert_eq!(reply.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
