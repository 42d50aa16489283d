//! In-memory storage double for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Storage, StorageError, StorageResult};
use crate::models::{NewReservation, NewTable, Reservation, ReservationStatus, Table};

#[derive(Default)]
struct Inner {
    tables: HashMap<i64, Table>,
    reservations: HashMap<i64, Reservation>,
    next_table_id: i64,
    next_reservation_id: i64,
}

/// HashMap-backed storage. Each operation runs under one mutex guard,
/// so `apply_seating` / `apply_finish` are atomic here as well.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn list_tables(&self) -> StorageResult<Vec<Table>> {
        let inner = self.inner.lock().await;
        let mut tables: Vec<Table> = inner.tables.values().cloned().collect();
        tables.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        Ok(tables)
    }

    async fn read_table(&self, table_id: i64) -> StorageResult<Option<Table>> {
        let inner = self.inner.lock().await;
        Ok(inner.tables.get(&table_id).cloned())
    }

    async fn create_table(&self, new: NewTable) -> StorageResult<Table> {
        let mut inner = self.inner.lock().await;
        inner.next_table_id += 1;
        let table = Table {
            table_id: inner.next_table_id,
            table_name: new.table_name,
            capacity: new.capacity,
            reservation_id: new.reservation_id,
            created_at: now(),
        };
        inner.tables.insert(table.table_id, table.clone());
        Ok(table)
    }

    async fn list_reservations(&self) -> StorageResult<Vec<Reservation>> {
        let inner = self.inner.lock().await;
        let mut reservations: Vec<Reservation> = inner.reservations.values().cloned().collect();
        reservations.sort_by_key(|r| r.reservation_id);
        Ok(reservations)
    }

    async fn read_reservation(&self, reservation_id: i64) -> StorageResult<Option<Reservation>> {
        let inner = self.inner.lock().await;
        Ok(inner.reservations.get(&reservation_id).cloned())
    }

    async fn create_reservation(&self, new: NewReservation) -> StorageResult<Reservation> {
        let mut inner = self.inner.lock().await;
        inner.next_reservation_id += 1;
        let reservation = Reservation {
            reservation_id: inner.next_reservation_id,
            people: new.people,
            status: new.status,
            created_at: now(),
        };
        inner
            .reservations
            .insert(reservation.reservation_id, reservation.clone());
        Ok(reservation)
    }

    async fn apply_seating(
        &self,
        table_id: i64,
        reservation_id: i64,
    ) -> StorageResult<(Table, Reservation)> {
        let mut inner = self.inner.lock().await;

        let table = inner.tables.get(&table_id).cloned().ok_or_else(|| {
            StorageError::RowNotFound(format!("Table {} cannot be found.", table_id))
        })?;
        if table.reservation_id.is_some() {
            return Err(StorageError::Conflict(format!(
                "Table {} is occupied, choose different table",
                table_id
            )));
        }
        let reservation = inner
            .reservations
            .get(&reservation_id)
            .cloned()
            .ok_or_else(|| {
                StorageError::RowNotFound(format!(
                    "Reservation {} cannot be found.",
                    reservation_id
                ))
            })?;

        // Обе записи меняются под одним lock, как в транзакции
        let table = Table {
            reservation_id: Some(reservation_id),
            ..table
        };
        let reservation = Reservation {
            status: ReservationStatus::Seated,
            ..reservation
        };
        inner.tables.insert(table_id, table.clone());
        inner.reservations.insert(reservation_id, reservation.clone());

        Ok((table, reservation))
    }

    async fn apply_finish(&self, table_id: i64) -> StorageResult<(Table, Reservation)> {
        let mut inner = self.inner.lock().await;

        let table = inner.tables.get(&table_id).cloned().ok_or_else(|| {
            StorageError::RowNotFound(format!("Table {} cannot be found.", table_id))
        })?;
        let reservation_id = table.reservation_id.ok_or_else(|| {
            StorageError::Conflict(format!("Table {} is not occupied", table_id))
        })?;
        let reservation = inner
            .reservations
            .get(&reservation_id)
            .cloned()
            .ok_or_else(|| {
                StorageError::RowNotFound(format!(
                    "Reservation {} cannot be found.",
                    reservation_id
                ))
            })?;

        let table = Table {
            reservation_id: None,
            ..table
        };
        let reservation = Reservation {
            status: ReservationStatus::Finished,
            ..reservation
        };
        inner.tables.insert(table_id, table.clone());
        inner.reservations.insert(reservation_id, reservation.clone());

        Ok((table, reservation))
    }
}
