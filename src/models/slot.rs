//! Shift slot model (input and allocation outcome).
//!
//! A `ShiftSlot` is one unit of required coverage exactly as the station
//! registry supplies it: free-text day and location, an `HHMM-HHMM` time
//! range, and optionally an explicit number of hours. After a run each slot
//! is returned as an [`AllocatedSlot`] carrying its [`Allocation`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ShiftType, Weekday};

/// Outcome marker for slots no worker could take.
pub const UNASSIGNED: &str = "Unassigned";

/// Canonical form of a free-text location label (trimmed, lower-case).
pub fn canonical_location(label: &str) -> String {
    label.trim().to_lowercase()
}

/// One slot of required coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Caller-side identifier, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Day name (e.g. "Monday").
    pub day: String,
    /// Location label.
    pub location: String,
    /// Time range, `HHMM-HHMM`.
    pub time: String,
    /// Explicit duration in hours; derived from `time` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

impl ShiftSlot {
    /// Creates a slot without explicit hours.
    pub fn new(
        day: impl Into<String>,
        location: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            day: day.into(),
            location: location.into(),
            time: time.into(),
            hours: None,
        }
    }

    /// Sets an explicit duration.
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Sets the caller-side identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Who a slot went to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Allocation {
    /// Assigned to the named worker.
    Assigned(String),
    /// No eligible worker.
    Unassigned,
}

impl Allocation {
    /// Worker name, if assigned.
    pub fn worker(&self) -> Option<&str> {
        match self {
            Allocation::Assigned(name) => Some(name),
            Allocation::Unassigned => None,
        }
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        matches!(self, Allocation::Assigned(_))
    }
}

impl From<String> for Allocation {
    fn from(value: String) -> Self {
        if value == UNASSIGNED {
            Allocation::Unassigned
        } else {
            Allocation::Assigned(value)
        }
    }
}

impl From<Allocation> for String {
    fn from(value: Allocation) -> Self {
        match value {
            Allocation::Assigned(name) => name,
            Allocation::Unassigned => UNASSIGNED.to_string(),
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.worker().unwrap_or(UNASSIGNED))
    }
}

/// A slot together with its allocation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatedSlot {
    /// The input slot, unchanged.
    #[serde(flatten)]
    pub slot: ShiftSlot,
    /// Parsed day.
    pub weekday: Weekday,
    /// Classified shift type.
    pub shift_type: ShiftType,
    /// Effective duration in hours (explicit or derived).
    pub duration_hours: f64,
    /// Outcome.
    pub allocated_to: Allocation,
}

impl AllocatedSlot {
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.allocated_to.is_assigned()
    }

    /// Assigned worker name, if any.
    pub fn worker(&self) -> Option<&str> {
        self.allocated_to.worker()
    }
}
