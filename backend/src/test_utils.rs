//! Shared helpers for router-level tests.

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{LoginRequest, LoginResponse, SessionResponse, VerifyLoginRequest};
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::storage::DbConnection;
use crate::{build_state, create_router, AppState};

/// App on a private in-memory database with login tokens exposed
pub async fn test_app() -> Result<(AppState, Router)> {
    let mut config = AppConfig::default();
    config.auth.expose_login_tokens = true;
    let db = DbConnection::in_memory().await?;
    let state = build_state(db, config)?;
    let router = create_router(state.clone())?;
    Ok((state, router))
}

/// Send a request and return status plus raw body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Vec<u8>)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

pub fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Run the magic-link flow and return the session
pub async fn sign_in(app: &Router, email: &str) -> Result<SessionResponse> {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::to_value(LoginRequest {
            email: email.to_string(),
        })?),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let login: LoginResponse = parse(&body)?;
    let token = login
        .login_token
        .ok_or_else(|| anyhow::anyhow!("login token not exposed"))?;

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/verify",
        None,
        Some(serde_json::to_value(VerifyLoginRequest { token })?),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    parse(&body)
}
