//! # REST API Interface Layer
//!
//! HTTP endpoints for the sales tracker: JSON (de)serialization, translation
//! of domain errors to status codes, and request logging. No business logic
//! lives here.

pub mod auth_apis;
pub mod dashboard_apis;
pub mod extract;
pub mod logging_apis;
pub mod mappers;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::DomainError;

const STORAGE_ERROR_MESSAGE: &str = "Storage error, please try again";
const DELIVERY_ERROR_MESSAGE: &str = "Could not send the login link, please try again";

/// Domain error carried out of a handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

/// Malformed JSON bodies are a client error like any other bad input
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self(DomainError::InvalidArgument(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!("Rejected path parameter: {}", rejection.body_text());
        Self(DomainError::InvalidArgument(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Storage(_) | DomainError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            DomainError::Storage(e) => {
                error!("Storage failure: {:?}", e);
                STORAGE_ERROR_MESSAGE.to_string()
            }
            DomainError::Delivery(e) => {
                error!("Delivery failure: {:?}", e);
                DELIVERY_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    async fn body_of(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_argument_is_bad_request() {
        let (status, body) = body_of(ApiError(DomainError::InvalidArgument("day must be between 1 and 30, got 31".to_string()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "invalid argument: day must be between 1 and 30, got 31");
    }

    #[tokio::test]
    async fn test_unauthorized_is_401() {
        let error = ApiError(DomainError::Unauthorized("unknown session".to_string()));
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);

        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "unauthorized: unknown session");
    }

    #[tokio::test]
    async fn test_storage_details_are_not_exposed() {
        let error = ApiError(DomainError::Storage(anyhow!("disk I/O error at /var/lib/sales.db")));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Storage error, please try again");
    }

    #[tokio::test]
    async fn test_delivery_details_are_not_exposed() {
        let (status, body) = body_of(ApiError(DomainError::Delivery(anyhow!("535 bad credentials")))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Could not send the login link, please try again");
    }
}
