use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{Storage, StorageError, StorageResult};
use crate::models::{NewReservation, NewTable, Reservation, ReservationStatus, Table};

#[derive(Clone)]
pub struct PgStorage {
    pool: Pool<Postgres>,
}

impl PgStorage {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn list_tables(&self) -> StorageResult<Vec<Table>> {
        let tables = sqlx::query_as::<_, Table>(
            "SELECT table_id, table_name, capacity, reservation_id, created_at
             FROM tables
             ORDER BY table_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tables)
    }

    async fn read_table(&self, table_id: i64) -> StorageResult<Option<Table>> {
        let table = sqlx::query_as::<_, Table>(
            "SELECT table_id, table_name, capacity, reservation_id, created_at
             FROM tables
             WHERE table_id = $1",
        )
        .bind(table_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(table)
    }

    async fn create_table(&self, new: NewTable) -> StorageResult<Table> {
        let table = sqlx::query_as::<_, Table>(
            "INSERT INTO tables (table_name, capacity, reservation_id)
             VALUES ($1, $2, $3)
             RETURNING table_id, table_name, capacity, reservation_id, created_at",
        )
        .bind(new.table_name)
        .bind(new.capacity)
        .bind(new.reservation_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(table)
    }

    async fn list_reservations(&self) -> StorageResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT reservation_id, people, status, created_at
             FROM reservations
             ORDER BY created_at, reservation_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    async fn read_reservation(&self, reservation_id: i64) -> StorageResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT reservation_id, people, status, created_at
             FROM reservations
             WHERE reservation_id = $1",
        )
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }

    async fn create_reservation(&self, new: NewReservation) -> StorageResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (people, status)
             VALUES ($1, $2)
             RETURNING reservation_id, people, status, created_at",
        )
        .bind(new.people)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(reservation)
    }

    async fn apply_seating(
        &self,
        table_id: i64,
        reservation_id: i64,
    ) -> StorageResult<(Table, Reservation)> {
        let mut tx = self.pool.begin().await?;

        // Условный UPDATE: проигравший из двух одновременных запросов
        // не пройдет фильтр reservation_id IS NULL
        let table = sqlx::query_as::<_, Table>(
            "UPDATE tables
             SET reservation_id = $2
             WHERE table_id = $1 AND reservation_id IS NULL
             RETURNING table_id, table_name, capacity, reservation_id, created_at",
        )
        .bind(table_id)
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            StorageError::Conflict(format!(
                "Table {} is occupied, choose different table",
                table_id
            ))
        })?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations
             SET status = $2
             WHERE reservation_id = $1
             RETURNING reservation_id, people, status, created_at",
        )
        .bind(reservation_id)
        .bind(ReservationStatus::Seated)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            StorageError::RowNotFound(format!(
                "Reservation {} cannot be found.",
                reservation_id
            ))
        })?;

        tx.commit().await?;
        Ok((table, reservation))
    }

    async fn apply_finish(&self, table_id: i64) -> StorageResult<(Table, Reservation)> {
        let mut tx = self.pool.begin().await?;

        // Блокируем строку стола, чтобы два finish не прошли одновременно
        let occupant: Option<Option<i64>> = sqlx::query_scalar(
            "SELECT reservation_id FROM tables WHERE table_id = $1 FOR UPDATE",
        )
        .bind(table_id)
        .fetch_optional(&mut *tx)
        .await?;

        let reservation_id = match occupant {
            None => {
                return Err(StorageError::RowNotFound(format!(
                    "Table {} cannot be found.",
                    table_id
                )))
            }
            Some(None) => {
                return Err(StorageError::Conflict(format!(
                    "Table {} is not occupied",
                    table_id
                )))
            }
            Some(Some(id)) => id,
        };

        let table = sqlx::query_as::<_, Table>(
            "UPDATE tables
             SET reservation_id = NULL
             WHERE table_id = $1
             RETURNING table_id, table_name, capacity, reservation_id, created_at",
        )
        .bind(table_id)
        .fetch_one(&mut *tx)
        .await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations
             SET status = $2
             WHERE reservation_id = $1
             RETURNING reservation_id, people, status, created_at",
        )
        .bind(reservation_id)
        .bind(ReservationStatus::Finished)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            StorageError::RowNotFound(format!(
                "Reservation {} cannot be found.",
                reservation_id
            ))
        })?;

        tx.commit().await?;
        Ok((table, reservation))
    }
}
