//! Input validation and allocation audit.
//!
//! [`prepare`] checks a request before any slot is decided and turns it into
//! a [`PreparedInput`]. It detects:
//! - Unknown or empty day names
//! - Empty locations
//! - Unparsable time ranges (slots and prior-week tail)
//! - Non-finite or non-positive explicit hours
//! - Empty, duplicate or reserved worker names
//!
//! All problems are collected, not just the first, so the caller can fix the
//! registry in one pass.
//!
//! [`audit_allocation`] re-checks a finished allocation against the run
//! invariants: no double booking, hour and shift caps, minimum rest between
//! neighbouring days,
//! preference and location.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::allocator::{
    AllocationRequest, AllocationResult, PreparedInput, PreparedSlot, WorkerProfile,
};
use crate::models::{
    canonical_location, rest_gap_minutes, AllocatedSlot, ShiftSlot, TimeRange, Weekday,
    UNASSIGNED,
};
use crate::policy::AllocationPolicy;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending slot or worker.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Slot day is empty or not a weekday name.
    UnknownDay,
    /// Slot location is empty.
    MissingLocation,
    /// Slot time is not `HHMM-HHMM`.
    InvalidTimeRange,
    /// Explicit hours are not a positive finite number.
    InvalidHours,
    /// Worker has an empty name.
    EmptyWorkerName,
    /// Two workers share a name.
    DuplicateWorker,
    /// Worker is named like the unassigned marker.
    ReservedWorkerName,
    /// Prior-week tail time range is not `HHMM-HHMM`.
    InvalidPriorTail,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request without keeping the prepared form.
pub fn validate_input(request: &AllocationRequest, policy: &AllocationPolicy) -> ValidationResult {
    prepare(request, policy).map(|_| ())
}

/// Validates a request and builds the normalised input for a run.
///
/// # Returns
/// `Ok(input)` if all checks pass, `Err(errors)` with every detected issue.
pub fn prepare(
    request: &AllocationRequest,
    policy: &AllocationPolicy,
) -> Result<PreparedInput, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    let mut profiles = Vec::with_capacity(request.workers.len());
    for (index, worker) in request.workers.iter().enumerate() {
        let profile = WorkerProfile::from_worker(index, worker);
        if profile.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyWorkerName,
                format!("worker[{index}] has no name"),
            ));
        } else if profile.name.eq_ignore_ascii_case(UNASSIGNED) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedWorkerName,
                format!("worker[{index}] uses the reserved name '{UNASSIGNED}'"),
            ));
        } else if !names.insert(profile.name.clone()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateWorker,
                format!("worker[{index}] duplicates name '{}'", profile.name),
            ));
        }
        profiles.push(profile);
    }

    let mut slots = Vec::with_capacity(request.slots.len());
    for (index, slot) in request.slots.iter().enumerate() {
        match prepare_slot(index, slot, policy) {
            Ok(prepared) => slots.push(prepared),
            Err(mut slot_errors) => errors.append(&mut slot_errors),
        }
    }

    let positions: HashMap<&str, usize> = profiles
        .iter()
        .map(|p| (p.name.as_str(), p.index))
        .collect();
    let mut tails = vec![None; profiles.len()];
    for (name, raw) in &request.prior_week_tail {
        let range = match raw.parse::<TimeRange>() {
            Ok(range) => range,
            Err(e) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPriorTail,
                    format!("prior-week tail for '{name}': '{raw}': {e}"),
                ));
                continue;
            }
        };
        match positions.get(name.trim()) {
            Some(&index) => tails[index] = Some(range),
            None => tracing::warn!(
                worker = %name,
                "prior-week tail names an unknown worker; ignored"
            ),
        }
    }

    if errors.is_empty() {
        Ok(PreparedInput {
            slots,
            profiles,
            tails,
        })
    } else {
        Err(errors)
    }
}

fn slot_label(index: usize, slot: &ShiftSlot) -> String {
    match &slot.id {
        Some(id) => format!("slot[{index}] ({id})"),
        None => format!("slot[{index}]"),
    }
}

fn prepare_slot(
    index: usize,
    slot: &ShiftSlot,
    policy: &AllocationPolicy,
) -> Result<PreparedSlot, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let label = || slot_label(index, slot);

    let weekday = slot.day.parse::<Weekday>().map_err(|e| {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownDay,
            format!("{}: {e}", label()),
        ))
    });

    let location = canonical_location(&slot.location);
    if location.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingLocation,
            format!("{}: location is empty", label()),
        ));
    }

    let time = slot.time.parse::<TimeRange>().map_err(|e| {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeRange,
            format!("{}: time '{}': {e}", label(), slot.time),
        ))
    });

    if let Some(hours) = slot.hours {
        if !(hours.is_finite() && hours > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("{}: hours must be a positive number, got {hours}", label()),
            ));
        }
    }

    match (weekday, time) {
        (Ok(weekday), Ok(time)) if errors.is_empty() => Ok(PreparedSlot {
            index,
            weekday,
            location,
            time,
            shift_type: policy.shift_boundaries.classify(&time),
            duration_hours: slot.hours.unwrap_or_else(|| time.duration_hours()),
        }),
        _ => Err(errors),
    }
}

// ======================== Allocation audit ========================

/// Classification of invariant violations in a finished allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Result does not have one entry per request slot.
    SlotCountMismatch,
    /// Slot assigned to a name not in the worker list.
    UnknownWorker,
    /// Worker's day preference rejects the slot's shift type.
    PreferenceMismatch,
    /// Worker not qualified for the slot's location.
    LocationMismatch,
    /// Worker holds two slots on one day.
    DoubleBooked,
    /// Worker's hours exceed the weekly cap.
    HourCapExceeded,
    /// Worker holds more slots than allowed.
    ShiftCapExceeded,
    /// Shifts on neighbouring days are closer than the minimum rest.
    InsufficientRest,
}

/// An invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Worker involved, if any.
    pub worker: Option<String>,
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, worker: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            worker: worker.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Checks a finished allocation against the run invariants.
///
/// Works on any [`AllocationResult`], including ones edited by hand after a
/// run. Returns an empty list when every invariant holds.
pub fn audit_allocation(
    request: &AllocationRequest,
    result: &AllocationResult,
    policy: &AllocationPolicy,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if result.slots.len() != request.slots.len() {
        violations.push(Violation::new(
            ViolationKind::SlotCountMismatch,
            None,
            format!(
                "{} slots requested, {} returned",
                request.slots.len(),
                result.slots.len()
            ),
        ));
    }

    let workers: HashMap<&str, WorkerProfile> = request
        .workers
        .iter()
        .enumerate()
        .map(|(i, w)| (w.name.trim(), WorkerProfile::from_worker(i, w)))
        .collect();

    let mut by_worker: BTreeMap<&str, Vec<(usize, &AllocatedSlot)>> = BTreeMap::new();
    for (index, allocated) in result.slots.iter().enumerate() {
        let Some(name) = allocated.worker() else {
            continue;
        };
        let Some(profile) = workers.get(name) else {
            violations.push(Violation::new(
                ViolationKind::UnknownWorker,
                Some(name),
                format!("slot[{index}] assigned to unknown worker"),
            ));
            continue;
        };
        if !profile
            .preference(allocated.weekday)
            .accepts(allocated.shift_type)
        {
            violations.push(Violation::new(
                ViolationKind::PreferenceMismatch,
                Some(name),
                format!(
                    "slot[{index}]: {} shift on {} not accepted",
                    allocated.shift_type, allocated.weekday
                ),
            ));
        }
        if !profile.is_qualified_for(&canonical_location(&allocated.slot.location)) {
            violations.push(Violation::new(
                ViolationKind::LocationMismatch,
                Some(name),
                format!("slot[{index}]: not qualified for '{}'", allocated.slot.location),
            ));
        }
        by_worker.entry(name).or_default().push((index, allocated));
    }

    for (name, slots) in &by_worker {
        audit_worker(name, slots, request, policy, &mut violations);
    }

    violations
}

fn audit_worker(
    name: &str,
    slots: &[(usize, &AllocatedSlot)],
    request: &AllocationRequest,
    policy: &AllocationPolicy,
    violations: &mut Vec<Violation>,
) {
    let mut days = HashSet::new();
    for (index, allocated) in slots {
        if !days.insert(allocated.weekday) {
            violations.push(Violation::new(
                ViolationKind::DoubleBooked,
                Some(name),
                format!("slot[{index}]: second slot on {}", allocated.weekday),
            ));
        }
    }

    let hours: f64 = slots.iter().map(|(_, s)| s.duration_hours).sum();
    if hours > policy.weekly_hour_cap + 1e-9 {
        violations.push(Violation::new(
            ViolationKind::HourCapExceeded,
            Some(name),
            format!("{hours} hours exceeds cap of {}", policy.weekly_hour_cap),
        ));
    }

    if slots.len() > policy.max_shifts_per_worker {
        violations.push(Violation::new(
            ViolationKind::ShiftCapExceeded,
            Some(name),
            format!(
                "{} shifts exceeds cap of {}",
                slots.len(),
                policy.max_shifts_per_worker
            ),
        ));
    }

    // First slot per day; a second one is already reported as double booked.
    let mut by_day: BTreeMap<Weekday, TimeRange> = BTreeMap::new();
    for (_, allocated) in slots {
        if let Ok(range) = allocated.slot.time.parse::<TimeRange>() {
            by_day.entry(allocated.weekday).or_insert(range);
        }
    }

    let min_rest = policy.min_rest_minutes as i32;
    for (&day, earlier) in &by_day {
        let Some(next) = day.next() else {
            continue;
        };
        let Some(later) = by_day.get(&next) else {
            continue;
        };
        let gap = rest_gap_minutes(earlier, day.index() as i32, later, next.index() as i32);
        if gap < min_rest {
            violations.push(Violation::new(
                ViolationKind::InsufficientRest,
                Some(name),
                format!("{gap} minutes between {day} and {next} shifts"),
            ));
        }
    }

    if !policy.cross_week_rest {
        return;
    }
    let tail = request
        .prior_week_tail
        .iter()
        .find(|(n, _)| n.trim() == name)
        .and_then(|(_, raw)| raw.parse::<TimeRange>().ok());
    if let (Some(tail), Some(sunday)) = (tail, by_day.get(&Weekday::Sunday)) {
        let gap = rest_gap_minutes(&tail, -1, sunday, Weekday::Sunday.index() as i32);
        if gap < min_rest {
            violations.push(Violation::new(
                ViolationKind::InsufficientRest,
                Some(name),
                format!("{gap} minutes between prior-week and sunday shifts"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allocation, DayPreference, ShiftType, WeekPreferences, Worker};

    fn any_worker(name: &str) -> Worker {
        Worker::new(name)
            .with_preferences(WeekPreferences::uniform(DayPreference::Any))
            .with_location("Depot")
    }

    fn request(slots: Vec<ShiftSlot>) -> AllocationRequest {
        AllocationRequest::new(vec![any_worker("Ana"), any_worker("Ben")], slots)
    }

    #[test]
    fn test_valid_input() {
        let req = request(vec![
            ShiftSlot::new("Monday", "Depot", "0600-1400"),
            ShiftSlot::new("tue", " depot ", "22:00-06:00").with_hours(7.5),
        ]);
        let input = prepare(&req, &AllocationPolicy::default()).unwrap();
        assert_eq!(input.slots.len(), 2);
        assert_eq!(input.slots[0].weekday, Weekday::Monday);
        assert_eq!(input.slots[0].shift_type, ShiftType::Early);
        assert!((input.slots[0].duration_hours - 8.0).abs() < 1e-10);
        assert_eq!(input.slots[1].location, "depot");
        assert_eq!(input.slots[1].shift_type, ShiftType::Night);
        assert!((input.slots[1].duration_hours - 7.5).abs() < 1e-10);
        assert_eq!(input.profiles.len(), 2);
        assert!(validate_input(&req, &AllocationPolicy::default()).is_ok());
    }

    #[test]
    fn test_malformed_slot_identified() {
        let req = request(vec![
            ShiftSlot::new("Monday", "Depot", "0600-1400"),
            ShiftSlot::new("Monday", "Depot", "6am-2pm").with_id("st-7"),
        ]);
        let errors = prepare(&req, &AllocationPolicy::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidTimeRange);
        assert!(errors[0].message.contains("slot[1] (st-7)"));
        assert!(errors[0].message.contains("6am-2pm"));
    }

    #[test]
    fn test_missing_day_and_location() {
        let req = request(vec![ShiftSlot::new("", "  ", "0600-1400")]);
        let errors = prepare(&req, &AllocationPolicy::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownDay));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingLocation));
    }

    #[test]
    fn test_invalid_hours() {
        for hours in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let req = request(vec![
                ShiftSlot::new("Monday", "Depot", "0600-1400").with_hours(hours)
            ]);
            let errors = prepare(&req, &AllocationPolicy::default()).unwrap_err();
            assert_eq!(errors[0].kind, ValidationErrorKind::InvalidHours);
        }
    }

    #[test]
    fn test_worker_names() {
        let req = AllocationRequest::new(
            vec![
                any_worker("Ana"),
                any_worker("Ana"),
                any_worker(" "),
                any_worker("unassigned"),
            ],
            vec![],
        );
        let errors = prepare(&req, &AllocationPolicy::default()).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::DuplicateWorker,
                ValidationErrorKind::EmptyWorkerName,
                ValidationErrorKind::ReservedWorkerName,
            ]
        );
    }

    #[test]
    fn test_prior_tail() {
        let req = request(vec![])
            .with_prior_tail("Ben", "2200-0600")
            .with_prior_tail("Nobody", "0600-1400");
        let input = prepare(&req, &AllocationPolicy::default()).unwrap();
        assert_eq!(input.tails[0], None);
        assert_eq!(input.tails[1], Some("2200-0600".parse().unwrap()));

        let bad = request(vec![]).with_prior_tail("Ana", "late");
        let errors = prepare(&bad, &AllocationPolicy::default()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidPriorTail);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let req = AllocationRequest::new(
            vec![any_worker("")],
            vec![
                ShiftSlot::new("Moonday", "Depot", "0600-1400"),
                ShiftSlot::new("Monday", "", "9999"),
            ],
        );
        let errors = prepare(&req, &AllocationPolicy::default()).unwrap_err();
        assert!(errors.len() >= 4);
    }

    fn allocated(day: Weekday, time: &str, worker: &str) -> AllocatedSlot {
        let range: TimeRange = time.parse().unwrap();
        AllocatedSlot {
            slot: ShiftSlot::new(day.name(), "Depot", time),
            weekday: day,
            shift_type: crate::policy::ShiftBoundaries::default().classify(&range),
            duration_hours: range.duration_hours(),
            allocated_to: Allocation::from(worker.to_string()),
        }
    }

    fn result_of(slots: Vec<AllocatedSlot>) -> AllocationResult {
        AllocationResult {
            slots,
            loads: Vec::new(),
        }
    }

    fn request_for(result: &AllocationResult) -> AllocationRequest {
        request(result.slots.iter().map(|s| s.slot.clone()).collect())
    }

    #[test]
    fn test_audit_clean() {
        let result = result_of(vec![
            allocated(Weekday::Monday, "0600-1400", "Ana"),
            allocated(Weekday::Tuesday, "0600-1400", "Ana"),
            allocated(Weekday::Monday, "0600-1400", "Ben"),
            allocated(Weekday::Friday, "0600-1400", UNASSIGNED),
        ]);
        let req = request_for(&result);
        assert!(audit_allocation(&req, &result, &AllocationPolicy::default()).is_empty());
    }

    #[test]
    fn test_audit_detects_double_booking_and_rest() {
        let result = result_of(vec![
            allocated(Weekday::Sunday, "2200-0600", "Ana"),
            allocated(Weekday::Monday, "0800-1600", "Ana"),
            allocated(Weekday::Monday, "1800-2200", "Ana"),
        ]);
        let req = request_for(&result);
        let violations = audit_allocation(&req, &result, &AllocationPolicy::default());
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::DoubleBooked));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::InsufficientRest));
        assert!(violations
            .iter()
            .all(|v| v.worker.as_deref() == Some("Ana")));
    }

    #[test]
    fn test_audit_rest_only_between_neighbouring_days() {
        let result = result_of(vec![
            allocated(Weekday::Monday, "2359-2358", "Ana"),
            allocated(Weekday::Wednesday, "0000-0800", "Ana"),
        ]);
        let req = request_for(&result);
        assert!(audit_allocation(&req, &result, &AllocationPolicy::default()).is_empty());

        let result = result_of(vec![
            allocated(Weekday::Monday, "2359-2358", "Ana"),
            allocated(Weekday::Tuesday, "2359-0800", "Ana"),
        ]);
        let req = request_for(&result);
        let violations = audit_allocation(&req, &result, &AllocationPolicy::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::InsufficientRest);
        assert!(violations[0].message.contains("monday and tuesday"));
    }

    #[test]
    fn test_audit_caps() {
        let days = [
            Weekday::Sunday,
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ];
        let result = result_of(
            days.iter()
                .map(|&d| allocated(d, "0600-1800", "Ben"))
                .collect(),
        );
        let req = request_for(&result);
        let violations = audit_allocation(&req, &result, &AllocationPolicy::default());
        // 6 × 12h = 72h is within the hour cap, but 6 shifts is not
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::ShiftCapExceeded));
        assert!(!violations
            .iter()
            .any(|v| v.kind == ViolationKind::HourCapExceeded));

        let tight = AllocationPolicy::default().with_weekly_hour_cap(60.0);
        assert!(audit_allocation(&req, &result, &tight)
            .iter()
            .any(|v| v.kind == ViolationKind::HourCapExceeded));
    }

    #[test]
    fn test_audit_unknown_worker_and_tail() {
        let result = result_of(vec![
            allocated(Weekday::Sunday, "0600-1400", "Ana"),
            allocated(Weekday::Monday, "0600-1400", "Zoe"),
        ]);
        let req = request_for(&result).with_prior_tail("Ana", "1600-0200");
        let violations = audit_allocation(&req, &result, &AllocationPolicy::default());
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::UnknownWorker));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::InsufficientRest
                && v.message.contains("prior-week")));
    }

    #[test]
    fn test_audit_slot_count() {
        let result = result_of(vec![]);
        let req = request(vec![ShiftSlot::new("Monday", "Depot", "0600-1400")]);
        let violations = audit_allocation(&req, &result, &AllocationPolicy::default());
        assert_eq!(violations[0].kind, ViolationKind::SlotCountMismatch);
    }
}
