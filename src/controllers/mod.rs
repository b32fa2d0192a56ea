pub mod cinema;
pub mod bookings;
pub mod analytics;

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::error::BookingError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(cinema::routes())
        .merge(bookings::routes())
        .merge(analytics::routes())
}

/* ---------- helpers ---------- */

// Тело ответа для ошибок (HTTP 400, 404)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub reason: &'static str,
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn bad_request(reason: &'static str, message: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, reason, message)
}

pub(crate) fn not_found(reason: &'static str, message: impl Into<String>) -> ApiError {
    api_error(StatusCode::NOT_FOUND, reason, message)
}

fn api_error(status: StatusCode, reason: &'static str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            reason,
            message: message.into(),
        }),
    )
}

impl From<BookingError> for ErrorResponse {
    fn from(err: BookingError) -> Self {
        Self {
            success: false,
            reason: err.code(),
            message: err.to_string(),
        }
    }
}
