//! Table assignment: validated CRUD over tables plus the seat/finish
//! state machine.
//!
//! Каждая операция - цепочка guard-проверок в фиксированном порядке,
//! первая сработавшая возвращает свою ошибку. Сами переходы состояния
//! выполняет Storage одной атомарной операцией.

use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewTable, Reservation, ReservationStatus, Table};
use crate::storage::Storage;

/// Raw create payload. `capacity` приходит как f64, чтобы дробное
/// значение (2.5) дошло до guard-проверки, а не падало на serde
#[derive(Debug, Clone, Default)]
pub struct CreateTableInput {
    pub table_name: Option<String>,
    pub capacity: Option<f64>,
    pub reservation_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct SeatInput {
    pub reservation_id: Option<i64>,
}

pub struct TableAssignmentService {
    storage: Arc<dyn Storage>,
}

impl TableAssignmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Table>> {
        Ok(self.storage.list_tables().await?)
    }

    pub async fn create(&self, input: CreateTableInput) -> ServiceResult<Table> {
        let table_name = input
            .table_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ServiceError::MissingField("Table must include a table_name".to_string())
            })?;
        let capacity = input.capacity.ok_or_else(|| {
            ServiceError::MissingField("Table must include a capacity".to_string())
        })?;

        if table_name.chars().count() < 2 {
            return Err(ServiceError::InvalidValue(
                "table_name must be at least 2 characters".to_string(),
            ));
        }
        if capacity <= 0.0 || capacity.fract() != 0.0 {
            return Err(ServiceError::InvalidValue(
                "capacity must be an integer greater than 0".to_string(),
            ));
        }

        let table = self
            .storage
            .create_table(NewTable {
                table_name,
                capacity: capacity as i32,
                reservation_id: input.reservation_id,
            })
            .await?;
        Ok(table)
    }

    /// Free -> Occupied. Guards fail fast, in this order:
    /// reservation_id present, reservation exists, table exists,
    /// reservation not already seated, table not occupied, party fits.
    pub async fn seat_reservation(
        &self,
        table_id: i64,
        input: SeatInput,
    ) -> ServiceResult<(Table, Reservation)> {
        let reservation_id = input.reservation_id.ok_or_else(|| {
            ServiceError::MissingField("Table must include a reservation_id".to_string())
        })?;

        let reservation = self
            .storage
            .read_reservation(reservation_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Reservation {} cannot be found.",
                    reservation_id
                ))
            })?;

        let table = self
            .storage
            .read_table(table_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Table {} cannot be found.", table_id)))?;

        if reservation.status == ReservationStatus::Seated {
            return Err(ServiceError::Conflict(
                "this reservation is already seated".to_string(),
            ));
        }
        if table.reservation_id.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Table {} is occupied, choose different table",
                table.table_id
            )));
        }
        if reservation.people > table.capacity {
            return Err(ServiceError::Conflict(format!(
                "Table {} can not seat {} people, choose table with higher capacity",
                table.table_id, reservation.people
            )));
        }

        // Обе записи обновляются одной операцией хранилища
        Ok(self.storage.apply_seating(table_id, reservation_id).await?)
    }

    /// Occupied -> Free. A free table is a Conflict, not a NotFound;
    /// the reservation lookup runs after the occupancy guard so a
    /// dangling reference still surfaces as 404.
    pub async fn finish_reservation(&self, table_id: i64) -> ServiceResult<(Table, Reservation)> {
        let table = self
            .storage
            .read_table(table_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Table {} cannot be found.", table_id)))?;

        let reservation_id = table.reservation_id.ok_or_else(|| {
            ServiceError::Conflict(format!("Table {} is not occupied", table_id))
        })?;

        self.storage
            .read_reservation(reservation_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Reservation {} cannot be found.",
                    reservation_id
                ))
            })?;

        Ok(self.storage.apply_finish(table_id).await?)
    }
}
