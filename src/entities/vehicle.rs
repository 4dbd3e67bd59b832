// 🚗 Vehicle Entity - one member of the fleet
//
// A vehicle is a closed set of variants: passenger cars carry seats,
// trucks carry payload. Plate is the identity and is stored normalised
// (trimmed, upper-case) so lookups never depend on how it was typed.

use crate::error::{RentalError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// VEHICLE KIND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum VehicleKind {
    /// Seat count
    PassengerCar { seats: u32 },

    /// Maximum payload in kilograms
    Truck { payload_kg: u32 },
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::PassengerCar { .. } => "Passenger car",
            VehicleKind::Truck { .. } => "Truck",
        }
    }

    /// Raw capacity number (seats or kg)
    pub fn capacity(&self) -> u32 {
        match self {
            VehicleKind::PassengerCar { seats } => *seats,
            VehicleKind::Truck { payload_kg } => *payload_kg,
        }
    }

    pub fn capacity_description(&self) -> String {
        match self {
            VehicleKind::PassengerCar { seats } => format!("{} seats", seats),
            VehicleKind::Truck { payload_kg } => format!("max {} kg", payload_kg),
        }
    }
}

// ============================================================================
// VEHICLE ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique key within the fleet
    pub plate: String,

    /// Flat price per rented day
    pub daily_rate: f64,

    #[serde(flatten)]
    pub kind: VehicleKind,
}

impl Vehicle {
    /// Validated constructor shared by the variant helpers
    pub fn new(plate: &str, daily_rate: f64, kind: VehicleKind) -> Result<Self> {
        let vehicle = Vehicle {
            plate: normalize_plate(plate),
            daily_rate,
            kind,
        };
        vehicle.validate()?;
        Ok(vehicle)
    }

    pub fn passenger_car(plate: &str, daily_rate: f64, seats: u32) -> Result<Self> {
        Vehicle::new(plate, daily_rate, VehicleKind::PassengerCar { seats })
    }

    pub fn truck(plate: &str, daily_rate: f64, payload_kg: u32) -> Result<Self> {
        Vehicle::new(plate, daily_rate, VehicleKind::Truck { payload_kg })
    }

    /// Check the invariants a deserialised vehicle may not satisfy
    pub fn validate(&self) -> Result<()> {
        if self.plate.trim().is_empty() {
            return Err(RentalError::Validation("plate must not be empty".to_string()));
        }

        if !self.daily_rate.is_finite() || self.daily_rate <= 0.0 {
            return Err(RentalError::Validation(format!(
                "daily rate of {} must be positive, got {}",
                self.plate, self.daily_rate
            )));
        }

        if self.kind.capacity() == 0 {
            return Err(RentalError::Validation(format!(
                "capacity of {} must be positive",
                self.plate
            )));
        }

        Ok(())
    }

    /// Human-readable summary, e.g. "Truck QWE-234 - max 1200 kg - 18000 Ft/day"
    pub fn describe(&self, currency: &str) -> String {
        format!(
            "{} {} - {} - {} {}/day",
            self.kind.label(),
            self.plate,
            self.kind.capacity_description(),
            self.daily_rate,
            currency
        )
    }
}

/// Plates compare trimmed and upper-cased
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

// ============================================================================
// TESTS
// ============================================================================
