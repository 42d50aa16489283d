use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{DataRequest, DataResponse};
use crate::error::ServiceError;
use crate::models::Reservation;
use crate::services::reservations::{CreateReservationInput, ReservationService};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservations", get(list).post(create))
        .route("/reservations/{reservation_id}", get(read))
}

#[derive(Debug, Deserialize, Default)]
struct CreateReservationRequest {
    people: Option<f64>,
}

// GET /reservations
async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<Reservation>>>, ServiceError> {
    let service = ReservationService::new(state.storage.clone());
    let reservations = service.list().await?;
    Ok(Json(DataResponse { data: reservations }))
}

// GET /reservations/{reservation_id}
async fn read(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<i64>,
) -> Result<Json<DataResponse<Reservation>>, ServiceError> {
    let service = ReservationService::new(state.storage.clone());
    let reservation = service.read(reservation_id).await?;
    Ok(Json(DataResponse { data: reservation }))
}

// POST /reservations
async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DataRequest<CreateReservationRequest>>,
) -> Result<(StatusCode, Json<DataResponse<Reservation>>), ServiceError> {
    let req = body.data.unwrap_or_default();
    let service = ReservationService::new(state.storage.clone());
    let reservation = service
        .create(CreateReservationInput { people: req.people })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}
