//! JSON body extractor that reports malformed bodies as validation errors.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// Like [`axum::Json`], but rejections become [`ApiError::Validation`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
