//! Eligibility filter.
//!
//! A worker may take a slot only if, at the moment the slot is decided:
//! 1. their preference for the day accepts the slot's shift type,
//! 2. they are qualified for the slot's location,
//! 3. they have nothing committed on that day yet,
//! 4. the shifts on the day before and the day after (and, on the first day
//!    of the week, the prior-week tail) leave the minimum rest,
//! 5. the slot keeps them within the weekly hour cap,
//! 6. they are below the per-worker shift cap.
//!
//! Checks run in that order and the first failure is reported.

use std::fmt;

use super::{PreparedSlot, WorkerLedger, WorkerProfile};
use crate::models::{rest_gap_minutes, DayPreference, ShiftType, TimeRange, Weekday};
use crate::policy::AllocationPolicy;

/// Tolerance for floating-point hour sums.
const HOURS_EPSILON: f64 = 1e-9;

/// Why a worker cannot take a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Ineligibility {
    /// Preference for the day does not accept this shift type.
    Preference {
        preference: DayPreference,
        shift_type: ShiftType,
    },
    /// Not qualified for the slot's location.
    Location,
    /// Already holds a slot that day.
    AlreadyCommitted,
    /// Too little rest next to another shift. `other_day` is `None` for the
    /// prior-week tail.
    InsufficientRest {
        other_day: Option<Weekday>,
        gap_minutes: i32,
    },
    /// Slot would push the worker past the weekly hour cap.
    HourCap { would_reach: f64 },
    /// Worker already holds the maximum number of shifts.
    ShiftCap { committed: usize },
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preference {
                preference,
                shift_type,
            } => write!(f, "preference {preference:?} does not accept {shift_type} shift"),
            Self::Location => f.write_str("not qualified for location"),
            Self::AlreadyCommitted => f.write_str("already committed that day"),
            Self::InsufficientRest {
                other_day: Some(day),
                gap_minutes,
            } => write!(f, "only {gap_minutes} minutes rest next to {day} shift"),
            Self::InsufficientRest {
                other_day: None,
                gap_minutes,
            } => write!(f, "only {gap_minutes} minutes rest after prior-week shift"),
            Self::HourCap { would_reach } => write!(f, "would reach {would_reach} hours"),
            Self::ShiftCap { committed } => write!(f, "already holds {committed} shifts"),
        }
    }
}

/// Checks whether `profile` may take `slot` given their commitments so far.
///
/// `tail` is the worker's shift on the last day of the previous week.
pub fn check(
    profile: &WorkerProfile,
    ledger: &WorkerLedger,
    tail: Option<&TimeRange>,
    slot: &PreparedSlot,
    policy: &AllocationPolicy,
) -> Result<(), Ineligibility> {
    let preference = profile.preference(slot.weekday);
    if !preference.accepts(slot.shift_type) {
        return Err(Ineligibility::Preference {
            preference,
            shift_type: slot.shift_type,
        });
    }

    if !profile.is_qualified_for(&slot.location) {
        return Err(Ineligibility::Location);
    }

    if ledger.is_committed_on(slot.weekday) {
        return Err(Ineligibility::AlreadyCommitted);
    }

    check_rest(ledger, tail, slot, policy)?;

    let would_reach = ledger.hours() + slot.duration_hours;
    if would_reach > policy.weekly_hour_cap + HOURS_EPSILON {
        return Err(Ineligibility::HourCap { would_reach });
    }

    if ledger.shift_count() >= policy.max_shifts_per_worker {
        return Err(Ineligibility::ShiftCap {
            committed: ledger.shift_count(),
        });
    }

    Ok(())
}

/// Rest check against the shifts on the neighbouring days and, for the first
/// day of the week, the prior-week tail.
fn check_rest(
    ledger: &WorkerLedger,
    tail: Option<&TimeRange>,
    slot: &PreparedSlot,
    policy: &AllocationPolicy,
) -> Result<(), Ineligibility> {
    let min_rest = policy.min_rest_minutes as i32;
    let day = slot.weekday.index() as i32;

    if let Some(previous) = slot.weekday.previous() {
        if let Some(shift) = ledger.shift_on(previous) {
            let gap = rest_gap_minutes(&shift.time, day - 1, &slot.time, day);
            if gap < min_rest {
                return Err(Ineligibility::InsufficientRest {
                    other_day: Some(previous),
                    gap_minutes: gap,
                });
            }
        }
    }

    if let Some(next) = slot.weekday.next() {
        if let Some(shift) = ledger.shift_on(next) {
            let gap = rest_gap_minutes(&slot.time, day, &shift.time, day + 1);
            if gap < min_rest {
                return Err(Ineligibility::InsufficientRest {
                    other_day: Some(next),
                    gap_minutes: gap,
                });
            }
        }
    }

    if policy.cross_week_rest && slot.weekday.is_first() {
        if let Some(tail) = tail {
            let gap = rest_gap_minutes(tail, -1, &slot.time, day);
            if gap < min_rest {
                return Err(Ineligibility::InsufficientRest {
                    other_day: None,
                    gap_minutes: gap,
                });
            }
        }
    }

    Ok(())
}
