// ⚠️ Error types for the rental domain and the roster loader

use chrono::NaiveDate;
use thiserror::Error;

// ============================================================================
// RENTAL ERRORS
// ============================================================================

/// Errors raised by vehicle construction and registry operations.
///
/// A failed operation never mutates the registry: every check runs
/// before the reservation list is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RentalError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("cannot book a past date: {date} is before {today}")]
    InvalidDate { date: NaiveDate, today: NaiveDate },

    #[error("vehicle {plate} is already booked for {date}")]
    Conflict { plate: String, date: NaiveDate },

    #[error("no vehicle with plate {0}")]
    VehicleNotFound(String),

    #[error("no reservation for {plate} on {date} by {renter_id}")]
    ReservationNotFound {
        plate: String,
        date: NaiveDate,
        renter_id: String,
    },
}

impl RentalError {
    /// True for both "unknown plate" and "no matching reservation"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RentalError::VehicleNotFound(_) | RentalError::ReservationNotFound { .. }
        )
    }
}

// ============================================================================
// ROSTER ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("roster is missing required column: {0}")]
    MissingColumn(String),
}

impl RosterError {
    /// True when the source was readable but its content was malformed
    pub fn is_format(&self) -> bool {
        match self {
            RosterError::Io(_) => false,
            RosterError::Csv(err) => !matches!(err.kind(), csv::ErrorKind::Io(_)),
            RosterError::MissingColumn(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;
