//! analytics.rs
//!
//! Статистика зала и подсветка доступных мест.
//!
//! - `GET /api/stats`: счётчики броней, фрагментация и заполненность.
//! - `GET /api/available-seats?partySize=N`: места, которые можно занять
//!   группой из N человек без нарушения правил бронирования.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::controllers::{bad_request, ApiError};
use crate::models::SeatId;
use crate::AppState;

/// Определяет маршруты, связанные со статистикой.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(get_statistics))
        .route("/available-seats", get(get_available_seats))
}

/// GET /api/stats
async fn get_statistics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stats = state.booking().statistics();
    Json(stats)
}

/// GET /api/available-seats
///
/// Без параметра считается, что бронирует один человек.
#[derive(Debug, Deserialize, Validate)]
struct AvailableSeatsQuery {
    #[serde(rename = "partySize", default = "default_party_size")]
    #[validate(range(min = 1, max = 1000))]
    party_size: usize,
}

fn default_party_size() -> usize {
    1
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailableSeatsResponse {
    party_size: usize,
    available_seats: Vec<SeatId>,
}

async fn get_available_seats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailableSeatsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    params
        .validate()
        .map_err(|e| bad_request("INVALID_PARTY_SIZE", e.to_string()))?;

    let available_seats = state.booking().available_seats(params.party_size);

    tracing::debug!(
        "Available seats for party of {}: {}",
        params.party_size,
        available_seats.len()
    );

    Ok((
        StatusCode::OK,
        Json(AvailableSeatsResponse {
            party_size: params.party_size,
            available_seats,
        }),
    ))
}
