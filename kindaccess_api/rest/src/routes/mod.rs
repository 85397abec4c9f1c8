use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiErrorKind, ApiFailure, ApiSuccess};

pub mod contact;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    failure(ApiErrorKind::InternalError, "Internal server error")
}

fn success() -> Response {
    Json(ApiSuccess::default()).into_response()
}

/// Every failure is reported with the same status; `kind` tells them apart.
fn failure(kind: ApiErrorKind, error: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiFailure::new(kind, error)),
    )
        .into_response()
}
