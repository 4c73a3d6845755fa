//! Validated, normalised view of a run's input.
//!
//! Built once by [`validation::prepare`](crate::validation::prepare) before
//! any slot is decided. Free-text labels are already canonical here, so the
//! eligibility filter compares plain values.

use std::collections::HashSet;

use crate::models::{
    canonical_location, DayPreference, ShiftType, TimeRange, WeekPreferences, Weekday, Worker,
};

/// A slot after parsing and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSlot {
    /// Position in the request's slot list.
    pub index: usize,
    pub weekday: Weekday,
    /// Canonical location label.
    pub location: String,
    pub time: TimeRange,
    pub shift_type: ShiftType,
    /// Effective duration in hours.
    pub duration_hours: f64,
}

/// Per-run derived data for one worker.
#[derive(Debug, Clone)]
pub struct WorkerProfile {
    /// Position in the request's worker list.
    pub index: usize,
    pub name: String,
    pub preferences: WeekPreferences,
    /// Canonical qualified locations.
    pub locations: HashSet<String>,
    /// Days with any availability.
    pub available_days: usize,
    /// Available on Saturday or Sunday.
    pub weekend_available: bool,
}

impl WorkerProfile {
    /// Derives the profile of `worker` at position `index`.
    pub fn from_worker(index: usize, worker: &Worker) -> Self {
        Self {
            index,
            name: worker.name.trim().to_string(),
            preferences: worker.preferences,
            locations: worker
                .locations
                .iter()
                .map(|l| canonical_location(l))
                .filter(|l| !l.is_empty())
                .collect(),
            available_days: worker.preferences.available_days(),
            weekend_available: worker.preferences.weekend_available(),
        }
    }

    #[inline]
    pub fn preference(&self, day: Weekday) -> DayPreference {
        self.preferences.get(day)
    }

    #[inline]
    pub fn is_qualified_for(&self, canonical_location: &str) -> bool {
        self.locations.contains(canonical_location)
    }
}

/// Everything the allocation loop reads.
#[derive(Debug, Clone)]
pub struct PreparedInput {
    /// One entry per request slot, same order.
    pub slots: Vec<PreparedSlot>,
    /// One entry per request worker, same order.
    pub profiles: Vec<WorkerProfile>,
    /// Prior-week tail per worker, indexed like `profiles`.
    pub tails: Vec<Option<TimeRange>>,
}
