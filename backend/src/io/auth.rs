//! Bearer-session middleware for protected routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::domain::DomainError;
use crate::io::rest::ApiError;
use crate::AppState;

/// Resolve `Authorization: Bearer <token>` to a `SessionContext` and make it
/// available to handlers as a request extension.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or_else(|| {
        warn!("Rejected {} {}: missing bearer token", req.method(), req.uri().path());
        ApiError(DomainError::Unauthorized("missing bearer token".to_string()))
    })?;

    let session = state.session_service.resolve_session(&token).await?;
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
