//! Session-local history of accepted submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{format_raw, format_speed};
use crate::report::PaceReport;
use crate::{compute, validate_input, PaceResult, RaceInput, ValidationError};

pub const HISTORY_COLUMNS: [&str; 7] = [
    "Time",
    "Total Distance",
    "Covered Distance",
    "Elapsed Time",
    "Target Time",
    "Current Speed",
    "Required Speed",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Snapshot of one accepted submission, stored as display strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: String,
    pub total_distance: String,
    pub covered_distance: String,
    pub elapsed_time: String,
    pub target_time: String,
    pub current_speed: String,
    pub required_speed: String,
}

impl HistoryRecord {
    pub fn new(input: &RaceInput, result: &PaceResult, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            total_distance: format_raw(input.total_distance_km, "km"),
            covered_distance: format_raw(input.covered_distance_km, "km"),
            elapsed_time: format_raw(input.elapsed_time_h, "h"),
            target_time: format_raw(input.target_time_h, "h"),
            current_speed: format_speed(result.current_speed_kmh),
            required_speed: format_speed(result.required_speed_kmh),
        }
    }

    /// Cells in [`HISTORY_COLUMNS`] order.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.timestamp.as_str(),
            self.total_distance.as_str(),
            self.covered_distance.as_str(),
            self.elapsed_time.as_str(),
            self.target_time.as_str(),
            self.current_speed.as_str(),
            self.required_speed.as_str(),
        ]
    }
}

/// Append-only list of records, owned by whoever drives the session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Records in display order, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.records.iter().rev()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Rejected(Vec<ValidationError>),
    Accepted(PaceReport),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }
}

/// One calculator session: validates each submission, computes the report and
/// records accepted submissions in its history.
#[derive(Clone, Debug, Default)]
pub struct Session {
    history: History,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, input: &RaceInput, at: DateTime<Utc>) -> Submission {
        let errors = validate_input(input);
        if !errors.is_empty() {
            return Submission::Rejected(errors);
        }
        let result = compute(input);
        self.history.push(HistoryRecord::new(input, &result, at));
        Submission::Accepted(PaceReport::from(&result))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
