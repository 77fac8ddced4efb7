//! Shared helpers for router tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use cardkeep::api::{create_router, AppState, SharedState};
use cardkeep::config::{Config, MIN_PASSWORD_COST};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const SIGNING_KEY: &str = "integration-test-signing-key-0123456789";

pub fn test_config(verify_credentials: bool) -> Config {
    let mut config = Config::default();
    config.auth.signing_key = SIGNING_KEY.to_string();
    config.auth.password_cost = MIN_PASSWORD_COST;
    config.auth.verify_credentials = verify_credentials;
    config
}

pub fn test_app(verify_credentials: bool) -> (Router, SharedState) {
    let state = AppState::from_config(test_config(verify_credentials)).expect("valid config");
    (create_router(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (u16, Value) {
    match body {
        Some(body) => send_raw(app, method, uri, auth, &body.to_string()).await,
        None => {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(auth) = auth {
                builder = builder.header("Authorization", auth);
            }
            read(app, builder.body(Body::empty()).unwrap()).await
        }
    }
}

/// Send `body` verbatim as `application/json`, well-formed or not
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: &str,
) -> (u16, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    read(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

async fn read(app: &Router, request: Request<Body>) -> (u16, Value) {
    let response: Response<Body> = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn alice() -> Value {
    serde_json::json!({
        "name": "Alice",
        "lastName": "Liddell",
        "username": "alice",
        "email": "a@gmail.com",
        "password": "pw123456",
        "phone": "555-0100"
    })
}

/// Register alice and return her token and id
pub async fn register_alice(app: &Router) -> (String, i64) {
    let (status, body) = send(app, "POST", "/api/auth/register", None, Some(alice())).await;
    assert_eq!(status, 201, "register failed: {}", body);
    (
        body["token"].as_str().unwrap().to_string(),
        body["userId"].as_i64().unwrap(),
    )
}
