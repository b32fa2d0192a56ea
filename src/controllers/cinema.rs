use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cinema", get(get_cinema_state))
        .route("/config", get(get_hall_config))
}

// GET /api/cinema - схема зала с занятостью
async fn get_cinema_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let layout = state.booking().hall().layout();
    Json(layout)
}

// GET /api/config
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HallConfigResponse {
    rows: usize,
    seats_per_row: usize,
    total_seats: usize,
}

async fn get_hall_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = state.booking();
    let hall = service.hall();
    Json(HallConfigResponse {
        rows: hall.rows(),
        seats_per_row: hall.seats_per_row(),
        total_seats: hall.total_seats(),
    })
}
