//! Extractors whose rejections come back as [`ApiError`] JSON bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::io::rest::ApiError;

/// `axum::Json` with an `ErrorResponse` body on failure
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with an `ErrorResponse` body on failure
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
