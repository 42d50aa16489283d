pub mod reservations;
pub mod tables;

use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(tables::routes())
        .merge(reservations::routes())
}

// Конверт { "data": ... } - формат API, поле может отсутствовать
#[derive(Debug, Deserialize)]
pub struct DataRequest<T> {
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}
