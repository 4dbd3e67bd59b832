// 🕒 Clock - where "today" comes from
//
// Booking rejects past dates, so the registry needs a notion of the
// current day. Production uses the local calendar; tests pin a date.

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// Current calendar day (no time component)
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
