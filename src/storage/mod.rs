//! Injected persistence layer.
//!
//! Сервисы работают только через трейт `Storage`, поэтому в тестах
//! вместо Postgres подставляется `MemoryStorage`.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStorage;
pub use postgres::PgStorage;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewReservation, NewTable, Reservation, Table};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),

    #[error("{0}")]
    RowNotFound(String),

    #[error("{0}")]
    Conflict(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence capability: read-by-id, list, create, plus the two
/// transactional state transitions of the assignment state machine.
///
/// `apply_seating` / `apply_finish` mutate the table and its reservation
/// as a unit: either both records change or neither does.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_tables(&self) -> StorageResult<Vec<Table>>;
    async fn read_table(&self, table_id: i64) -> StorageResult<Option<Table>>;
    async fn create_table(&self, new: NewTable) -> StorageResult<Table>;

    async fn list_reservations(&self) -> StorageResult<Vec<Reservation>>;
    async fn read_reservation(&self, reservation_id: i64) -> StorageResult<Option<Reservation>>;
    async fn create_reservation(&self, new: NewReservation) -> StorageResult<Reservation>;

    /// Occupy `table_id` with `reservation_id` and mark the reservation
    /// seated. Fails with `Conflict` if the table is occupied at commit
    /// time, even when the caller's guard already passed.
    async fn apply_seating(
        &self,
        table_id: i64,
        reservation_id: i64,
    ) -> StorageResult<(Table, Reservation)>;

    /// Free `table_id` and mark its current reservation finished.
    async fn apply_finish(&self, table_id: i64) -> StorageResult<(Table, Reservation)>;
}
