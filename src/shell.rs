// 💬 Interactive shell - line-based menu over the registry
//
// Reads one command per line, prompts for its arguments and prints the
// outcome. Any failure of a single command is reported and the loop
// carries on; only "exit" (or end of input) stops it.

use crate::error::RentalError;
use crate::registry::RentalRegistry;
use crate::roster::{normalize_id, Roster};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Book,
    Cancel,
    List,
    Exit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Command> {
        match input.trim().to_lowercase().as_str() {
            "1" | "book" => Some(Command::Book),
            "2" | "cancel" => Some(Command::Cancel),
            "3" | "list" => Some(Command::List),
            "4" | "exit" | "quit" => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Plate, date and renter as typed by the user
struct Request {
    plate: String,
    date: String,
    renter_id: String,
}

pub struct Shell {
    registry: RentalRegistry,
    roster: Roster,
    currency: String,
}

impl Shell {
    pub fn new(registry: RentalRegistry, roster: Roster, currency: impl Into<String>) -> Self {
        Shell {
            registry,
            roster,
            currency: currency.into(),
        }
    }

    pub fn registry(&self) -> &RentalRegistry {
        &self.registry
    }

    /// Run the read-eval loop until exit or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "=== Car Rental ===")?;

        loop {
            writeln!(output)?;
            writeln!(output, "1) Book a vehicle")?;
            writeln!(output, "2) Cancel a reservation")?;
            writeln!(output, "3) List reservations")?;
            writeln!(output, "4) Exit")?;

            let Some(line) = prompt(&mut input, &mut output, "Choose: ")? else {
                break;
            };

            match Command::parse(&line) {
                Some(Command::Book) => self.book(&mut input, &mut output)?,
                Some(Command::Cancel) => self.cancel(&mut input, &mut output)?,
                Some(Command::List) => self.list(&mut output)?,
                Some(Command::Exit) => break,
                None => writeln!(output, "Invalid choice.")?,
            }
        }

        writeln!(output, "Goodbye!")?;
        output.flush()
    }

    fn book<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<()> {
        let Some(request) = read_request(input, output)? else {
            return Ok(());
        };

        if !self.roster.is_valid(&request.renter_id) {
            return writeln!(output, "Unknown renter id.");
        }

        let Some(date) = parse_date(&request.date, output)? else {
            return Ok(());
        };

        match self.registry.book(&request.plate, date, &request.renter_id) {
            Ok(price) => writeln!(output, "Booked, amount due: {} {}", price, self.currency),
            Err(err) => self.report(output, &err),
        }
    }

    fn cancel<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<()> {
        let Some(request) = read_request(input, output)? else {
            return Ok(());
        };

        let Some(date) = parse_date(&request.date, output)? else {
            return Ok(());
        };

        match self.registry.cancel(&request.plate, date, &request.renter_id) {
            Ok(_) => writeln!(output, "Reservation cancelled."),
            Err(err) => self.report(output, &err),
        }
    }

    fn list<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output)?;
        writeln!(output, "Current reservations:")?;
        for line in self.registry.list(&self.roster) {
            writeln!(output, " - {}", line)?;
        }
        Ok(())
    }

    /// Print a domain error, with a hint depending on its kind
    fn report<W: Write>(&self, output: &mut W, err: &RentalError) -> io::Result<()> {
        writeln!(output, "Error: {}.", err)?;

        match err {
            RentalError::VehicleNotFound(_) => {
                writeln!(output, "Available vehicles:")?;
                for vehicle in self.registry.fleet() {
                    writeln!(output, " - {}", vehicle.describe(&self.currency))?;
                }
                Ok(())
            }
            RentalError::Conflict { .. } => writeln!(output, "Choose another day or vehicle."),
            RentalError::InvalidDate { today, .. } => {
                writeln!(output, "Earliest bookable day is {}.", today.format(DATE_FORMAT))
            }
            RentalError::ReservationNotFound { .. } => Ok(()),
            // only raised while building the fleet
            RentalError::Validation(_) => Ok(()),
        }
    }
}

/// Print a prompt and read one trimmed line; None at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_request<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<Request>> {
    let Some(plate) = prompt(input, output, "Plate: ")? else {
        return Ok(None);
    };
    let Some(date) = prompt(input, output, "Date (YYYY-MM-DD): ")? else {
        return Ok(None);
    };
    let Some(renter_id) = prompt(input, output, "Renter id: ")? else {
        return Ok(None);
    };

    Ok(Some(Request {
        plate: plate.to_uppercase(),
        date,
        renter_id: normalize_id(&renter_id),
    }))
}

fn parse_date<W: Write>(raw: &str, output: &mut W) -> io::Result<Option<NaiveDate>> {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Ok(Some(date)),
        Err(err) => {
            writeln!(output, "Error: invalid date '{}' ({}), expected YYYY-MM-DD", raw, err)?;
            Ok(None)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
