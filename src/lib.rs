// Car Rental - Core Library
// Fleet, reservations and roster lookups, plus the interactive shell.

pub mod clock;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod registry;
pub mod roster;
pub mod shell;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{RentalConfig, SampleReservation, DEFAULT_CONFIG_FILE};
pub use entities::{normalize_plate, Reservation, Vehicle, VehicleKind};
pub use error::{RentalError, RosterError};
pub use registry::RentalRegistry;
pub use roster::{Roster, RosterColumns, RosterEntry};
pub use shell::{Command, Shell};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
