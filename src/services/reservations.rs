//! Minimal reservation owner: the assignment service only mutates
//! reservation status, creation and reads live here.

use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewReservation, Reservation, ReservationStatus};
use crate::storage::Storage;

#[derive(Debug, Clone, Default)]
pub struct CreateReservationInput {
    pub people: Option<f64>,
}

pub struct ReservationService {
    storage: Arc<dyn Storage>,
}

impl ReservationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Reservation>> {
        Ok(self.storage.list_reservations().await?)
    }

    pub async fn read(&self, reservation_id: i64) -> ServiceResult<Reservation> {
        self.storage
            .read_reservation(reservation_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Reservation {} cannot be found.",
                    reservation_id
                ))
            })
    }

    pub async fn create(&self, input: CreateReservationInput) -> ServiceResult<Reservation> {
        let people = input.people.ok_or_else(|| {
            ServiceError::MissingField("Reservation must include people".to_string())
        })?;
        if people <= 0.0 || people.fract() != 0.0 {
            return Err(ServiceError::InvalidValue(
                "people must be an integer greater than 0".to_string(),
            ));
        }

        let reservation = self
            .storage
            .create_reservation(NewReservation {
                people: people as i32,
                status: ReservationStatus::Booked,
            })
            .await?;
        Ok(reservation)
    }
}
