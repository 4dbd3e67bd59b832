// Entity Models
// Vehicles form the fleet; reservations bind a vehicle to a day and a renter.

pub mod vehicle;
pub mod reservation;

pub use vehicle::{normalize_plate, Vehicle, VehicleKind};
pub use reservation::Reservation;
