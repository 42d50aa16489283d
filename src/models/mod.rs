pub mod reservation;
pub mod table;

pub use reservation::{NewReservation, Reservation, ReservationStatus};
pub use table::{NewTable, Table};
