//! Weekly roster view and coverage metrics.
//!
//! Turns an [`AllocationResult`] into the per-worker grid the presentation
//! layer renders: one row per worker, one cell per weekday, plus hours worked
//! and the slots nobody could take.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage rate | assigned slots / all slots (1.0 for an empty week) |
//! | Hours worked | sum of effective slot durations per worker |
//! | Unassigned hours | sum of effective durations of unfilled slots |

use serde::{Deserialize, Serialize};

use crate::allocator::AllocationResult;
use crate::models::Weekday;

/// One filled cell of the roster grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Index of the slot in the allocation result.
    pub slot_index: usize,
    pub location: String,
    pub time: String,
    pub hours: f64,
}

/// A worker's week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    pub worker: String,
    /// Indexed by [`Weekday::index`]; `None` = day off.
    pub days: [Option<RosterEntry>; 7],
    pub hours: f64,
    pub shifts: usize,
}

impl RosterRow {
    fn empty(worker: &str) -> Self {
        Self {
            worker: worker.to_string(),
            days: Default::default(),
            hours: 0.0,
            shifts: 0,
        }
    }

    /// Entry for a day.
    pub fn on(&self, day: Weekday) -> Option<&RosterEntry> {
        self.days[day.index()].as_ref()
    }
}

/// Roster grid and coverage summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// One row per worker, in registry order.
    pub rows: Vec<RosterRow>,
    /// Indices of slots left unassigned.
    pub unassigned: Vec<usize>,
    pub total_slots: usize,
    pub assigned_slots: usize,
    /// Fraction of slots filled (0.0..=1.0).
    pub coverage_rate: f64,
    /// Hours of unfilled demand.
    pub unassigned_hours: f64,
}

impl RosterSummary {
    /// Builds the roster from an allocation result.
    ///
    /// Workers appear in the order of `result.loads`; names that only occur
    /// in slots (e.g. after a manual edit) are appended. If a worker holds
    /// two slots on one day, the first one is shown.
    pub fn from_allocation(result: &AllocationResult) -> Self {
        let mut rows: Vec<RosterRow> = result
            .loads
            .iter()
            .map(|l| RosterRow::empty(&l.worker))
            .collect();
        let mut unassigned = Vec::new();
        let mut unassigned_hours = 0.0;

        for (index, allocated) in result.slots.iter().enumerate() {
            let Some(worker) = allocated.worker() else {
                unassigned.push(index);
                unassigned_hours += allocated.duration_hours;
                continue;
            };

            let position = match rows.iter().position(|r| r.worker == worker) {
                Some(position) => position,
                None => {
                    rows.push(RosterRow::empty(worker));
                    rows.len() - 1
                }
            };
            let row = &mut rows[position];
            row.hours += allocated.duration_hours;
            row.shifts += 1;

            let cell = &mut row.days[allocated.weekday.index()];
            if cell.is_none() {
                *cell = Some(RosterEntry {
                    slot_index: index,
                    location: allocated.slot.location.clone(),
                    time: allocated.slot.time.clone(),
                    hours: allocated.duration_hours,
                });
            }
        }

        let total_slots = result.slots.len();
        let assigned_slots = total_slots - unassigned.len();
        let coverage_rate = if total_slots == 0 {
            1.0
        } else {
            assigned_slots as f64 / total_slots as f64
        };

        Self {
            rows,
            unassigned,
            total_slots,
            assigned_slots,
            coverage_rate,
            unassigned_hours,
        }
    }

    /// Row of a worker.
    pub fn row(&self, worker: &str) -> Option<&RosterRow> {
        self.rows.iter().find(|r| r.worker == worker)
    }

    /// Whether at least `min_rate` of the slots are filled.
    pub fn meets_coverage(&self, min_rate: f64) -> bool {
        self.coverage_rate >= min_rate
    }
}
