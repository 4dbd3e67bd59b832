// 📅 Reservation Entity - one vehicle, one day, one renter

use crate::roster::Roster;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Stable identity (UUID)
    pub id: String,

    /// Plate of the booked fleet vehicle
    pub plate: String,

    pub date: NaiveDate,

    pub renter_id: String,
}

impl Reservation {
    pub fn new(plate: String, date: NaiveDate, renter_id: String) -> Self {
        Reservation {
            id: uuid::Uuid::new_v4().to_string(),
            plate,
            date,
            renter_id,
        }
    }

    /// Same vehicle on the same day
    pub fn occupies(&self, plate: &str, date: NaiveDate) -> bool {
        self.plate == plate && self.date == date
    }

    /// Exact cancellation match; renter id compares case-insensitively
    pub fn matches(&self, plate: &str, date: NaiveDate, renter_id: &str) -> bool {
        self.occupies(plate, date) && self.renter_id.to_uppercase() == renter_id.to_uppercase()
    }

    /// Listing line, e.g. "2030-01-02: ZZZ-111 – rented by: Jane Doe (ABC123)"
    pub fn describe(&self, roster: &Roster) -> String {
        format!(
            "{}: {} – rented by: {} ({})",
            self.date.format("%Y-%m-%d"),
            self.plate,
            roster.name_for(&self.renter_id),
            self.renter_id
        )
    }
}
