// 🎓 Roster - who is allowed to rent
//
// Tab-separated table with a header row. Only the id and name columns
// matter; any other columns are ignored. Ids are compared trimmed and
// upper-cased. Duplicate ids are kept, lookups return the first match.

use crate::error::RosterError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_ID_COLUMN: &str = "Neptun";
pub const DEFAULT_NAME_COLUMN: &str = "Név";

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    /// Normalised (trimmed, upper-case) identifier
    pub id: String,
    pub name: String,
}

/// Header labels of the two required columns
#[derive(Debug, Clone, PartialEq)]
pub struct RosterColumns {
    pub id: String,
    pub name: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        RosterColumns {
            id: DEFAULT_ID_COLUMN.to_string(),
            name: DEFAULT_NAME_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Roster { entries }
    }

    /// Load a roster file from disk
    pub fn load<P: AsRef<Path>>(path: P, columns: &RosterColumns) -> Result<Self, RosterError> {
        let file = File::open(path.as_ref())?;
        let roster = Roster::from_reader(file, columns)?;
        info!(
            path = %path.as_ref().display(),
            entries = roster.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    /// Parse a tab-separated roster from any reader
    pub fn from_reader<R: Read>(reader: R, columns: &RosterColumns) -> Result<Self, RosterError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let id_idx = column_index(&headers, &columns.id)?;
        let name_idx = column_index(&headers, &columns.name)?;

        let mut entries = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let id = record.get(id_idx).unwrap_or("").trim().to_uppercase();
            let name = record.get(name_idx).unwrap_or("").trim().to_string();
            debug!(%id, %name, "roster row");
            entries.push(RosterEntry { id, name });
        }

        Ok(Roster { entries })
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, id: &str) -> Option<&RosterEntry> {
        let wanted = normalize_id(id);
        self.entries.iter().find(|entry| entry.id == wanted)
    }

    /// True iff some entry carries this id (case-insensitive)
    pub fn is_valid(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Display name for an id, or the id itself when unknown
    pub fn name_for(&self, id: &str) -> String {
        match self.find(id) {
            Some(entry) => entry.name.clone(),
            None => id.to_string(),
        }
    }
}

pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

fn column_index(headers: &csv::StringRecord, label: &str) -> Result<usize, RosterError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(label))
        .ok_or_else(|| RosterError::MissingColumn(label.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
