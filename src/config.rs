// ⚙️ Configuration - roster location, currency, seed fleet
//
// Stored as JSON. Every field has a default, so a partial file (or no
// file at all) still yields a working setup matching the sample data.

use crate::clock::Clock;
use crate::entities::Vehicle;
use crate::entities::VehicleKind;
use crate::registry::RentalRegistry;
use crate::roster::{RosterColumns, DEFAULT_ID_COLUMN, DEFAULT_NAME_COLUMN};
use anyhow::{anyhow, Context as AnyhowContext, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "rental.json";

/// Reservation booked at startup, dated relative to today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReservation {
    pub plate: String,
    pub days_ahead: i64,
    pub renter_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalConfig {
    /// Tab-separated roster file
    #[serde(default = "default_roster_path")]
    pub roster_path: PathBuf,

    /// Header label of the renter id column
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Header label of the display name column
    #[serde(default = "default_name_column")]
    pub name_column: String,

    /// Currency unit printed after prices
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_fleet")]
    pub fleet: Vec<Vehicle>,

    #[serde(default = "default_sample_reservations")]
    pub sample_reservations: Vec<SampleReservation>,
}

fn default_roster_path() -> PathBuf {
    PathBuf::from("roster.txt")
}

fn default_id_column() -> String {
    DEFAULT_ID_COLUMN.to_string()
}

fn default_name_column() -> String {
    DEFAULT_NAME_COLUMN.to_string()
}

fn default_currency() -> String {
    "Ft".to_string()
}

fn default_fleet() -> Vec<Vehicle> {
    vec![
        Vehicle {
            plate: "ZZZ-111".to_string(),
            daily_rate: 9500.0,
            kind: VehicleKind::PassengerCar { seats: 5 },
        },
        Vehicle {
            plate: "QWE-234".to_string(),
            daily_rate: 18000.0,
            kind: VehicleKind::Truck { payload_kg: 1200 },
        },
        Vehicle {
            plate: "RTY-345".to_string(),
            daily_rate: 11000.0,
            kind: VehicleKind::PassengerCar { seats: 4 },
        },
    ]
}

fn default_sample_reservations() -> Vec<SampleReservation> {
    [
        ("ZZZ-111", 1, "ABC123"),
        ("QWE-234", 2, "XYZ456"),
        ("RTY-345", 3, "HTT404"),
        ("ZZZ-111", 4, "ASD789"),
    ]
    .into_iter()
    .map(|(plate, days_ahead, renter_id)| SampleReservation {
        plate: plate.to_string(),
        days_ahead,
        renter_id: renter_id.to_string(),
    })
    .collect()
}

impl Default for RentalConfig {
    fn default() -> Self {
        RentalConfig {
            roster_path: default_roster_path(),
            id_column: default_id_column(),
            name_column: default_name_column(),
            currency: default_currency(),
            fleet: default_fleet(),
            sample_reservations: default_sample_reservations(),
        }
    }
}

impl RentalConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: RentalConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Load config from file if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            debug!(path = %path.as_ref().display(), "loading config");
            Self::from_file(path)
        } else {
            debug!(path = %path.as_ref().display(), "no config file, using defaults");
            Ok(RentalConfig::default())
        }
    }

    pub fn roster_columns(&self) -> RosterColumns {
        RosterColumns {
            id: self.id_column.clone(),
            name: self.name_column.clone(),
        }
    }

    /// Registry holding the configured fleet and sample reservations
    pub fn build_registry(&self, clock: Box<dyn Clock>) -> Result<RentalRegistry> {
        let mut registry = RentalRegistry::with_clock(clock);

        for vehicle in &self.fleet {
            registry
                .add_vehicle(vehicle.clone())
                .with_context(|| format!("Invalid fleet entry: {}", vehicle.plate))?;
        }

        let today = registry.today();
        for sample in &self.sample_reservations {
            let date = TimeDelta::try_days(sample.days_ahead)
                .and_then(|offset| today.checked_add_signed(offset))
                .ok_or_else(|| {
                    anyhow!(
                        "Sample reservation for {} is {} days out of calendar range",
                        sample.plate,
                        sample.days_ahead
                    )
                })?;
            registry
                .book(&sample.plate, date, &sample.renter_id)
                .with_context(|| format!("Invalid sample reservation for {}", sample.plate))?;
        }

        Ok(registry)
    }
}

// ============================================================================
// TESTS
// ============================================================================
