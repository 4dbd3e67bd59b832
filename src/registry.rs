// 🏢 Rental Registry - the fleet and its reservations
//
// Invariants:
// - at most one reservation per (plate, date)
// - a reservation is never created for a day before today
// - a reservation always refers to a plate present in the fleet
// - plates are unique within the fleet
//
// Checks run before any mutation, so a failed book/cancel leaves the
// reservation list untouched.

use crate::clock::{Clock, SystemClock};
use crate::entities::{normalize_plate, Reservation, Vehicle};
use crate::error::{RentalError, Result};
use crate::roster::Roster;
use chrono::NaiveDate;
use tracing::{info, warn};

// ============================================================================
// REGISTRY
// ============================================================================

pub struct RentalRegistry {
    /// Append-only fleet
    fleet: Vec<Vehicle>,

    /// Active reservations in booking order
    reservations: Vec<Reservation>,

    clock: Box<dyn Clock>,
}

impl RentalRegistry {
    /// Empty registry using the local calendar
    pub fn new() -> Self {
        RentalRegistry::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        RentalRegistry {
            fleet: Vec::new(),
            reservations: Vec::new(),
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Add a vehicle to the fleet (rejects invalid data and duplicate plates)
    pub fn add_vehicle(&mut self, mut vehicle: Vehicle) -> Result<()> {
        vehicle.plate = normalize_plate(&vehicle.plate);
        vehicle.validate()?;

        if self.find_vehicle(&vehicle.plate).is_some() {
            return Err(RentalError::Validation(format!(
                "vehicle {} is already in the fleet",
                vehicle.plate
            )));
        }

        self.fleet.push(vehicle);
        Ok(())
    }

    pub fn find_vehicle(&self, plate: &str) -> Option<&Vehicle> {
        let plate = normalize_plate(plate);
        self.fleet.iter().find(|v| v.plate == plate)
    }

    pub fn fleet(&self) -> &[Vehicle] {
        &self.fleet
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Book a vehicle for one day and return its daily rate.
    ///
    /// Checks, in order: date not in the past, no existing booking for
    /// the plate on that day, plate present in the fleet.
    pub fn book(&mut self, plate: &str, date: NaiveDate, renter_id: &str) -> Result<f64> {
        let plate = normalize_plate(plate);
        let renter_id = renter_id.trim();

        let today = self.clock.today();
        if date < today {
            warn!(%plate, %date, %today, "booking rejected: past date");
            return Err(RentalError::InvalidDate { date, today });
        }

        if self.reservations.iter().any(|r| r.occupies(&plate, date)) {
            warn!(%plate, %date, "booking rejected: already booked");
            return Err(RentalError::Conflict { plate, date });
        }

        let daily_rate = match self.find_vehicle(&plate) {
            Some(vehicle) => vehicle.daily_rate,
            None => {
                warn!(%plate, "booking rejected: unknown vehicle");
                return Err(RentalError::VehicleNotFound(plate));
            }
        };

        let reservation = Reservation::new(plate, date, renter_id.to_string());
        info!(
            id = %reservation.id,
            plate = %reservation.plate,
            %date,
            renter = %reservation.renter_id,
            "reservation booked"
        );
        self.reservations.push(reservation);

        Ok(daily_rate)
    }

    /// Cancel the first reservation matching plate, date and renter exactly
    pub fn cancel(&mut self, plate: &str, date: NaiveDate, renter_id: &str) -> Result<Reservation> {
        let plate = normalize_plate(plate);
        let renter_id = renter_id.trim();

        match self
            .reservations
            .iter()
            .position(|r| r.matches(&plate, date, renter_id))
        {
            Some(idx) => {
                let removed = self.reservations.remove(idx);
                info!(id = %removed.id, %plate, %date, renter = %renter_id, "reservation cancelled");
                Ok(removed)
            }
            None => {
                warn!(%plate, %date, renter = %renter_id, "cancel rejected: no such reservation");
                Err(RentalError::ReservationNotFound {
                    plate,
                    date,
                    renter_id: renter_id.to_string(),
                })
            }
        }
    }

    /// One line per reservation, in booking order
    pub fn list(&self, roster: &Roster) -> Vec<String> {
        self.reservations.iter().map(|r| r.describe(roster)).collect()
    }
}

impl Default for RentalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::roster::RosterEntry;
    use chrono::Duration;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Clock shared with the test so the day can move mid-session
    #[derive(Clone)]
    struct SteppingClock(Rc<Cell<NaiveDate>>);

    impl Clock for SteppingClock {
        fn today(&self) -> NaiveDate {
            self.0.get()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, 10).unwrap()
    }

    fn registry() -> RentalRegistry {
        let mut registry = RentalRegistry::with_clock(Box::new(FixedClock(today())));
        registry
            .add_vehicle(Vehicle::passenger_car("ZZZ-111", 9500.0, 5).unwrap())
            .unwrap();
        registry
    }

    fn roster() -> Roster {
        Roster::new(vec![
            RosterEntry {
                id: "ABC123".to_string(),
                name: "Jane Doe".to_string(),
            },
            RosterEntry {
                id: "XYZ456".to_string(),
                name: "John Smith".to_string(),
            },
        ])
    }

    #[test]
    fn test_book_list_cancel_scenario() {
        let mut registry = registry();
        let roster = roster();
        let tomorrow = today() + Duration::days(1);

        let price = registry.book("ZZZ-111", tomorrow, "ABC123").unwrap();
        assert_eq!(price, 9500.0);

        assert_eq!(
            registry.list(&roster),
            vec!["2030-03-11: ZZZ-111 – rented by: Jane Doe (ABC123)".to_string()]
        );

        let conflict = registry.book("ZZZ-111", tomorrow, "XYZ456");
        assert!(matches!(conflict, Err(RentalError::Conflict { .. })));

        registry.cancel("ZZZ-111", tomorrow, "ABC123").unwrap();
        assert!(registry.list(&roster).is_empty());
    }

    #[test]
    fn test_book_today_is_allowed() {
        let mut registry = registry();

        assert!(registry.book("ZZZ-111", today(), "ABC123").is_ok());
    }

    #[test]
    fn test_book_past_date_fails() {
        let mut registry = registry();
        let yesterday = today() - Duration::days(1);

        let err = registry.book("ZZZ-111", yesterday, "ABC123").unwrap_err();
        assert_eq!(
            err,
            RentalError::InvalidDate {
                date: yesterday,
                today: today(),
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_book_unknown_plate_fails() {
        let mut registry = registry();
        let tomorrow = today() + Duration::days(1);

        let err = registry.book("AAA-000", tomorrow, "ABC123").unwrap_err();
        assert_eq!(err, RentalError::VehicleNotFound("AAA-000".to_string()));
        assert!(err.is_not_found());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_past_date_checked_before_unknown_plate() {
        let mut registry = registry();
        let yesterday = today() - Duration::days(1);

        let err = registry.book("AAA-000", yesterday, "ABC123").unwrap_err();
        assert!(matches!(err, RentalError::InvalidDate { .. }));
    }

    #[test]
    fn test_past_date_checked_before_conflict() {
        let day = Rc::new(Cell::new(today()));
        let mut registry = RentalRegistry::with_clock(Box::new(SteppingClock(day.clone())));
        registry
            .add_vehicle(Vehicle::passenger_car("ZZZ-111", 9500.0, 5).unwrap())
            .unwrap();

        registry.book("ZZZ-111", today(), "ABC123").unwrap();

        // Session crosses midnight; the existing booking is now in the past
        day.set(today() + Duration::days(1));

        let err = registry.book("ZZZ-111", today(), "XYZ456").unwrap_err();
        assert_eq!(
            err,
            RentalError::InvalidDate {
                date: today(),
                today: today() + Duration::days(1),
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_plate_lookup_is_case_insensitive() {
        let mut registry = registry();
        let tomorrow = today() + Duration::days(1);

        registry.book("zzz-111", tomorrow, "ABC123").unwrap();
        assert_eq!(registry.reservations()[0].plate, "ZZZ-111");

        let conflict = registry.book(" ZZZ-111 ", tomorrow, "XYZ456");
        assert!(matches!(conflict, Err(RentalError::Conflict { .. })));
    }

    #[test]
    fn test_cancel_twice_fails_second_time() {
        let mut registry = registry();
        let tomorrow = today() + Duration::days(1);
        registry.book("ZZZ-111", tomorrow, "ABC123").unwrap();

        assert!(registry.cancel("ZZZ-111", tomorrow, "abc123").is_ok());

        let err = registry.cancel("ZZZ-111", tomorrow, "ABC123").unwrap_err();
        assert!(matches!(err, RentalError::ReservationNotFound { .. }));
    }

    #[test]
    fn test_cancel_requires_matching_renter() {
        let mut registry = registry();
        let tomorrow = today() + Duration::days(1);
        registry.book("ZZZ-111", tomorrow, "ABC123").unwrap();

        let err = registry.cancel("ZZZ-111", tomorrow, "XYZ456").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(registry.len(), 1);

        let err = registry
            .cancel("ZZZ-111", tomorrow + Duration::days(1), "ABC123")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_cancel_keeps_order_of_remaining() {
        let mut registry = registry();
        registry
            .add_vehicle(Vehicle::truck("QWE-234", 18000.0, 1200).unwrap())
            .unwrap();
        let d1 = today() + Duration::days(1);
        let d2 = today() + Duration::days(2);

        registry.book("ZZZ-111", d1, "ABC123").unwrap();
        registry.book("QWE-234", d1, "XYZ456").unwrap();
        registry.book("ZZZ-111", d2, "ABC123").unwrap();

        let removed = registry.cancel("QWE-234", d1, "XYZ456").unwrap();
        assert_eq!(removed.plate, "QWE-234");

        let lines = registry.list(&roster());
        assert_eq!(
            lines,
            vec![
                "2030-03-11: ZZZ-111 – rented by: Jane Doe (ABC123)".to_string(),
                "2030-03-12: ZZZ-111 – rented by: Jane Doe (ABC123)".to_string(),
            ]
        );
    }

    #[test]
    fn test_add_duplicate_plate_rejected() {
        let mut registry = registry();

        let err = registry
            .add_vehicle(Vehicle::truck("zzz-111", 18000.0, 1200).unwrap())
            .unwrap_err();
        assert!(matches!(err, RentalError::Validation(_)));
        assert_eq!(registry.fleet().len(), 1);
    }

    #[test]
    fn test_add_invalid_vehicle_rejected() {
        let mut registry = registry();
        let bogus = Vehicle {
            plate: "BAD-001".to_string(),
            daily_rate: -1.0,
            kind: crate::entities::VehicleKind::PassengerCar { seats: 4 },
        };

        assert!(matches!(
            registry.add_vehicle(bogus),
            Err(RentalError::Validation(_))
        ));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Book(usize, i64, usize),
        Cancel(usize, i64, usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..3, -2i64..5, 0usize..3).prop_map(|(p, d, r)| Op::Book(p, d, r)),
            (0usize..3, -2i64..5, 0usize..3).prop_map(|(p, d, r)| Op::Cancel(p, d, r)),
        ]
    }

    proptest! {
        #[test]
        fn test_at_most_one_reservation_per_plate_and_day(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let plates = ["ZZZ-111", "QWE-234", "NOP-999"];
            let renters = ["ABC123", "XYZ456", "HTT404"];

            let mut registry = registry();
            registry
                .add_vehicle(Vehicle::truck("QWE-234", 18000.0, 1200).unwrap())
                .unwrap();

            for op in ops {
                match op {
                    Op::Book(p, d, r) => {
                        let before = registry.len();
                        let date = today() + Duration::days(d);
                        match registry.book(plates[p], date, renters[r]) {
                            Ok(_) => {
                                prop_assert_eq!(registry.len(), before + 1);
                            }
                            Err(_) => {
                                prop_assert_eq!(registry.len(), before);
                            }
                        }
                    }
                    Op::Cancel(p, d, r) => {
                        let before = registry.len();
                        let date = today() + Duration::days(d);
                        match registry.cancel(plates[p], date, renters[r]) {
                            Ok(_) => {
                                prop_assert_eq!(registry.len(), before - 1);
                            }
                            Err(_) => {
                                prop_assert_eq!(registry.len(), before);
                            }
                        }
                    }
                }

                let mut seen = HashSet::new();
                for r in registry.reservations() {
                    prop_assert!(seen.insert((r.plate.clone(), r.date)));
                    prop_assert!(r.date >= today());
                    prop_assert!(registry.find_vehicle(&r.plate).is_some());
                }
            }
        }
    }
}
