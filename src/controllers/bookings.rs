use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::controllers::{not_found, ApiError, ErrorResponse};
use crate::error::BookingError;
use crate::models::{
    Admission, BookingId, BookingOutcome, BookingRequest, RejectionReason, SeatId,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/book", post(book_seats))
        .route("/reset", post(reset_cinema))
        .route("/bookings/{id}", get(get_booking))
}

/* ---------- BOOKING ---------- */

// Ответ на POST /api/book. Поля, не относящиеся к исходу, не сериализуются.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<BookingId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_reserved: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission: Option<Admission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_seats: Option<Vec<SeatId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragmentation_before: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragmentation_after: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragmentation_increase: Option<f64>,
}

impl From<BookingOutcome> for BookingResponse {
    fn from(outcome: BookingOutcome) -> Self {
        match outcome {
            BookingOutcome::Confirmed(c) => BookingResponse {
                success: true,
                seats_reserved: Some(c.seats_reserved()),
                message: c.message,
                booking_id: Some(c.booking_id),
                admission: Some(c.admission),
                reason: None,
                isolated_seats: None,
                suggestions: None,
                fragmentation_before: Some(c.fragmentation_before),
                fragmentation_after: Some(c.fragmentation_after),
                fragmentation_increase: Some(c.fragmentation_after - c.fragmentation_before),
            },
            BookingOutcome::Rejected(r) => {
                // детали есть только у отказа по фрагментации
                let fragmenting = r.reason == RejectionReason::FragmentationPrevention;
                BookingResponse {
                    success: false,
                    message: r.message,
                    booking_id: None,
                    seats_reserved: None,
                    admission: None,
                    reason: Some(r.reason),
                    isolated_seats: fragmenting.then_some(r.isolated_seats),
                    suggestions: fragmenting
                        .then(|| r.suggestions.iter().map(ToString::to_string).collect()),
                    fragmentation_before: None,
                    fragmentation_after: None,
                    fragmentation_increase: None,
                }
            }
        }
    }
}

// POST /api/book
async fn book_seats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = |e: BookingError| {
        tracing::warn!("book_seats: invalid request from {}: {}", req.customer_name, e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(e)))
    };

    // Разбор до захвата блокировки: размеры зала неизменны и есть в конфиге
    let seats = req
        .parse_seat_ids(state.config.hall.seats_per_row)
        .map_err(invalid)?;
    let outcome = state
        .booking()
        .book(seats, &req.customer_name)
        .map_err(invalid)?;

    Ok((StatusCode::OK, Json(BookingResponse::from(outcome))))
}

// POST /api/reset - полный сброс зала и статистики
async fn reset_cinema(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.booking().reset();
    Json(serde_json::json!({"success": true, "message": "Cinema reset"}))
}

// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state.booking().get_booking(&BookingId::from(id)).cloned();

    match booking {
        Some(booking) => Ok((StatusCode::OK, Json(booking))),
        None => Err(not_found("BOOKING_NOT_FOUND", format!("Booking {} not found", id))),
    }
}
