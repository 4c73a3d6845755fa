//! Run-local bookkeeping.
//!
//! A `RunState` is created fresh for every run and dropped at the end. It
//! records, per worker, the days committed so far, the shift committed on
//! each day, and the running hour total. Workers are keyed by their position
//! in the request, which is unique because names are.

use std::collections::BTreeMap;

use super::PreparedSlot;
use crate::models::{ShiftType, TimeRange, Weekday};

/// A shift committed to a worker on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedShift {
    pub shift_type: ShiftType,
    pub time: TimeRange,
}

/// Commitments of a single worker.
#[derive(Debug, Clone, Default)]
pub struct WorkerLedger {
    days: Vec<Weekday>,
    history: BTreeMap<Weekday, CommittedShift>,
    hours: f64,
}

impl WorkerLedger {
    /// Whether a slot is already committed on `day`.
    pub fn is_committed_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Shift committed on `day`, if any.
    pub fn shift_on(&self, day: Weekday) -> Option<&CommittedShift> {
        self.history.get(&day)
    }

    /// Committed shifts in week order.
    pub fn shifts(&self) -> impl Iterator<Item = (Weekday, &CommittedShift)> {
        self.history.iter().map(|(d, s)| (*d, s))
    }

    /// Days in commit order.
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    #[inline]
    pub fn shift_count(&self) -> usize {
        self.days.len()
    }

    #[inline]
    pub fn hours(&self) -> f64 {
        self.hours
    }
}

/// Bookkeeping for one allocation run.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    ledgers: Vec<WorkerLedger>,
}

impl RunState {
    /// Empty state for `worker_count` workers.
    pub fn new(worker_count: usize) -> Self {
        Self {
            ledgers: vec![WorkerLedger::default(); worker_count],
        }
    }

    /// Ledger of the worker at `worker_index`.
    ///
    /// # Panics
    /// If `worker_index` is out of range for this run.
    pub fn ledger(&self, worker_index: usize) -> &WorkerLedger {
        &self.ledgers[worker_index]
    }

    /// Commits `slot` to the worker at `worker_index`.
    pub fn commit(&mut self, worker_index: usize, slot: &PreparedSlot) {
        let ledger = &mut self.ledgers[worker_index];
        debug_assert!(!ledger.is_committed_on(slot.weekday));
        ledger.days.push(slot.weekday);
        ledger.history.insert(
            slot.weekday,
            CommittedShift {
                shift_type: slot.shift_type,
                time: slot.time,
            },
        );
        ledger.hours += slot.duration_hours;
    }

    /// All ledgers, indexed like the request's workers.
    pub fn ledgers(&self) -> &[WorkerLedger] {
        &self.ledgers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: Weekday, time: &str, hours: f64) -> PreparedSlot {
        PreparedSlot {
            index: 0,
            weekday: day,
            location: "depot".into(),
            time: time.parse().unwrap(),
            shift_type: ShiftType::Early,
            duration_hours: hours,
        }
    }

    #[test]
    fn test_commit_updates_all_views() {
        let mut state = RunState::new(2);
        state.commit(1, &slot(Weekday::Tuesday, "0600-1400", 8.0));
        state.commit(1, &slot(Weekday::Monday, "0700-1200", 5.0));

        let ledger = state.ledger(1);
        assert_eq!(ledger.days(), &[Weekday::Tuesday, Weekday::Monday]);
        assert_eq!(ledger.shift_count(), 2);
        assert!((ledger.hours() - 13.0).abs() < 1e-10);
        assert!(ledger.is_committed_on(Weekday::Monday));
        assert!(!ledger.is_committed_on(Weekday::Sunday));
        assert_eq!(
            ledger.shift_on(Weekday::Tuesday).map(|s| s.time.to_string()),
            Some("0600-1400".to_string())
        );

        let order: Vec<Weekday> = ledger.shifts().map(|(d, _)| d).collect();
        assert_eq!(order, vec![Weekday::Monday, Weekday::Tuesday]);

        assert_eq!(state.ledger(0).shift_count(), 0);
    }
}
