//! Routing: static paths, `{param}` segments, nested route groups, and the
//! 404/405 fallbacks, served for real on a loopback port.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::web;

/// Every route `build_router` registers, as printed at startup.
const ROUTES: [(&str, &str); 4] = [
    ("GET", "/ping"),
    ("GET", "/api/v1/users"),
    ("POST", "/api/v1/users"),
    ("GET", "/api/v1/users/{id}"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
}

#[derive(Clone, Default)]
struct AppState {
    users: Arc<RwLock<Vec<User>>>,
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.read().await.clone())
}

async fn get_user(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<User>, Response> {
    let users = state.users.read().await;
    users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| web::error(StatusCode::NOT_FOUND, format!("user {id} not found")))
}

async fn create_user(State(state): State<AppState>, Json(new): Json<NewUser>) -> (StatusCode, Json<User>) {
    let mut users = state.users.write().await;
    let user = User {
        id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
        name: new.name,
    };
    users.push(user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn not_found(uri: Uri) -> Response {
    web::error(StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
}

fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user));

    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .nest("/api/v1", api)
        .fallback(not_found)
        .with_state(state)
}

async fn exercise(router: Router) -> Result<(), Box<dyn std::error::Error>> {
    let server = web::spawn(router).await?;
    let http = web::client()?;
    println!("  listening on {}\n", server.addr());

    let requests = [
        ("GET", "/ping", None),
        ("GET", "/api/v1/users", None),
        ("GET", "/api/v1/users/2", None),
        ("POST", "/api/v1/users", Some(r#"{"name":"carol"}"#)),
        ("GET", "/api/v1/users/3", None),
        ("GET", "/api/v1/users/abc", None),
        ("GET", "/api/v1/users/99", None),
        ("DELETE", "/api/v1/users", None),
        ("GET", "/nowhere", None),
    ];

    for (method, path, body) in requests {
        let request = match method {
            "POST" => http.post(server.url(path)),
            "DELETE" => http.delete(server.url(path)),
            _ => http.get(server.url(path)),
        };
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(body),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        println!("  {method:<6} {path:<20} -> {} {body}", status.as_u16());
    }

    server.shutdown().await?;
    Ok(())
}

pub fn run() {
    println!("=== Routes ===\n");

    let state = AppState::default();
    state.users.blocking_write().extend([
        User { id: 1, name: "alice".into() },
        User { id: 2, name: "bob".into() },
    ]);
    let router = build_router(state);

    println!("--- Registered routes ---");
    for (method, path) in ROUTES {
        println!("  {method:<6} {path}");
    }

    println!("\n--- Requests ---");
    let result = web::runtime()
        .map_err(Into::into)
        .and_then(|rt| rt.block_on(exercise(router)));
    if let Err(err) = result {
        println!("error: {err}");
        return;
    }

    println!("\n=== Key Points ===");
    println!("1. {{name}} segments capture path parameters, typed by the extractor");
    println!("2. nest() mounts a group of routes under a shared prefix");
    println!("3. A known path with the wrong method is 405, an unknown path is 404");
}
