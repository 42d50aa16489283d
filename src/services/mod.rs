pub mod reservations;
pub mod tables;

pub use reservations::ReservationService;
pub use tables::TableAssignmentService;
