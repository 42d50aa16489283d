use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{DataRequest, DataResponse};
use crate::error::ServiceError;
use crate::models::Table;
use crate::services::tables::{CreateTableInput, SeatInput, TableAssignmentService};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tables", get(list).post(create))
        .route("/tables/{table_id}/seat", put(seat).delete(finish))
}

#[derive(Debug, Deserialize, Default)]
struct CreateTableRequest {
    table_name: Option<String>,
    capacity: Option<f64>,
    reservation_id: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
struct SeatRequest {
    reservation_id: Option<i64>,
}

// GET /tables
async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<Table>>>, ServiceError> {
    let service = TableAssignmentService::new(state.storage.clone());
    let tables = service.list().await?;
    Ok(Json(DataResponse { data: tables }))
}

// POST /tables
async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DataRequest<CreateTableRequest>>,
) -> Result<(StatusCode, Json<DataResponse<Table>>), ServiceError> {
    let req = body.data.unwrap_or_default();
    let service = TableAssignmentService::new(state.storage.clone());
    let table = service
        .create(CreateTableInput {
            table_name: req.table_name,
            capacity: req.capacity,
            reservation_id: req.reservation_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: table })))
}

// PUT /tables/{table_id}/seat
async fn seat(
    State(state): State<Arc<AppState>>,
    Path(table_id): Path<i64>,
    Json(body): Json<DataRequest<SeatRequest>>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let req = body.data.unwrap_or_default();
    let service = TableAssignmentService::new(state.storage.clone());
    let (table, reservation) = service
        .seat_reservation(
            table_id,
            SeatInput {
                reservation_id: req.reservation_id,
            },
        )
        .await?;

    // Один ответ с обеими обновленными записями
    Ok(Json(json!({
        "data": { "table": table, "reservation": reservation }
    })))
}

// DELETE /tables/{table_id}/seat
async fn finish(
    State(state): State<Arc<AppState>>,
    Path(table_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let service = TableAssignmentService::new(state.storage.clone());
    let (table, reservation) = service.finish_reservation(table_id).await?;

    Ok(Json(json!({
        "data": { "table": table, "reservation": reservation }
    })))
}
