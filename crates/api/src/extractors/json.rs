//! JSON body extractor whose rejections use the API error format.

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::ApiError;

/// Drop-in for [`axum::Json`] that reports malformed bodies as
/// `validation_error` instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
