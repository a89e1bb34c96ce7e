use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use shared::{LoginRequest, SignOutResponse, VerifyLoginRequest};
use tracing::info;

use crate::domain::commands::session::{RequestLoginCommand, VerifyLoginCommand};
use crate::domain::models::SessionContext;
use crate::io::rest::extract::ApiJson;
use crate::io::rest::mappers::SessionMapper;
use crate::io::rest::ApiError;
use crate::AppState;

/// Routes that do not need a session
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(request_login))
        .route("/auth/verify", post(verify_login))
}

/// Routes behind the session middleware
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/auth/session", get(get_session))
        .route("/auth/logout", post(sign_out))
}

/// Issue a magic link for the given email
async fn request_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/login");

    let challenge = state
        .session_service
        .request_login(RequestLoginCommand { email: request.email })
        .await?;

    let response = SessionMapper::to_login_response(challenge, state.config.auth.expose_login_tokens);
    Ok((StatusCode::OK, Json(response)))
}

/// Exchange a login token for a session
async fn verify_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/verify");

    let verified = state
        .session_service
        .verify_login(VerifyLoginCommand { token: request.token })
        .await?;

    Ok((StatusCode::OK, Json(SessionMapper::to_dto(&verified.session))))
}

/// Describe the caller's session
async fn get_session(Extension(session): Extension<SessionContext>) -> impl IntoResponse {
    info!("GET /api/auth/session - user: {}", session.user_id);
    (StatusCode::OK, Json(SessionMapper::to_dto(&session)))
}

/// End the caller's session
async fn sign_out(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/logout - user: {}", session.user_id);

    state.session_service.sign_out(&session).await?;
    Ok((
        StatusCode::OK,
        Json(SignOutResponse {
            success_message: "Signed out".to_string(),
        }),
    ))
}
