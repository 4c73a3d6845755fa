//! Greedy shift allocator.
//!
//! # Algorithm
//!
//! 1. Validate the policy and the request; nothing is decided on bad input.
//! 2. Derive a [`WorkerProfile`] per worker (available days, weekend
//!    availability, canonical locations).
//! 3. For each slot, in request order:
//!    - filter workers through the [eligibility](eligibility::check) rules
//!      against the commitments made so far in this run,
//!    - rank the survivors with the [`RankingEngine`],
//!    - commit the best one, or mark the slot `Unassigned`.
//!
//! A commitment is never revisited. Output slots keep the request order.
//!
//! # Complexity
//! O(s * w) where s=slots, w=workers; each rest check looks at two days.

mod eligibility;
mod prepared;
mod state;

pub use eligibility::{check as check_eligibility, Ineligibility};
pub use prepared::{PreparedInput, PreparedSlot, WorkerProfile};
pub use state::{CommittedShift, RunState, WorkerLedger};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, trace, warn};

use crate::error::AllocationError;
use crate::models::{AllocatedSlot, Allocation, ShiftSlot, Worker};
use crate::policy::AllocationPolicy;
use crate::ranking::{Candidate, RankingEngine};
use crate::validation;

/// Input of one allocation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    /// Worker registry, in ranking tie-break order.
    pub workers: Vec<Worker>,
    /// One week of slots, decided in this order.
    pub slots: Vec<ShiftSlot>,
    /// Worker name → time range worked on the previous week's last day.
    #[serde(default)]
    pub prior_week_tail: BTreeMap<String, String>,
}

impl AllocationRequest {
    /// Creates a request with no prior-week tail.
    pub fn new(workers: Vec<Worker>, slots: Vec<ShiftSlot>) -> Self {
        Self {
            workers,
            slots,
            prior_week_tail: BTreeMap::new(),
        }
    }

    /// Records a worker's shift on the previous week's last day.
    pub fn with_prior_tail(mut self, worker: impl Into<String>, time: impl Into<String>) -> Self {
        self.prior_week_tail.insert(worker.into(), time.into());
        self
    }
}

/// Committed load of one worker at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerLoad {
    pub worker: String,
    pub hours: f64,
    pub shifts: usize,
}

/// Output of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// One entry per request slot, same order.
    pub slots: Vec<AllocatedSlot>,
    /// One entry per request worker, same order.
    pub loads: Vec<WorkerLoad>,
}

impl AllocationResult {
    /// Number of slots given to a worker.
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_assigned()).count()
    }

    /// Number of slots left `Unassigned`.
    pub fn unassigned_count(&self) -> usize {
        self.slots.len() - self.assigned_count()
    }

    /// Slots assigned to `worker`, in request order.
    pub fn slots_for<'a>(&'a self, worker: &'a str) -> impl Iterator<Item = &'a AllocatedSlot> {
        self.slots.iter().filter(move |s| s.worker() == Some(worker))
    }

    /// Committed hours of `worker` (0 if unknown).
    pub fn hours_for(&self, worker: &str) -> f64 {
        self.loads
            .iter()
            .find(|l| l.worker == worker)
            .map(|l| l.hours)
            .unwrap_or(0.0)
    }
}

/// Deterministic greedy allocator.
///
/// Holds only configuration; every call to [`allocate`](Self::allocate)
/// uses its own [`RunState`], so one allocator can serve concurrent callers.
///
/// # Example
///
/// ```
/// use u_roster::allocator::{AllocationRequest, Allocator};
/// use u_roster::models::{Allocation, DayPreference, ShiftSlot, Weekday, Worker};
///
/// let workers = vec![Worker::new("Ana")
///     .with_preference(Weekday::Monday, DayPreference::Any)
///     .with_location("Depot")];
/// let slots = vec![
///     ShiftSlot::new("Monday", "Depot", "0600-1400"),
///     ShiftSlot::new("Monday", "Depot", "1500-2300"),
/// ];
///
/// let result = Allocator::default()
///     .allocate(&AllocationRequest::new(workers, slots))
///     .unwrap();
/// assert_eq!(result.slots[0].allocated_to, Allocation::Assigned("Ana".into()));
/// assert_eq!(result.slots[1].allocated_to, Allocation::Unassigned);
/// assert_eq!(result.hours_for("Ana"), 8.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    policy: AllocationPolicy,
    ranking: RankingEngine,
}

impl Allocator {
    /// Creates an allocator with the standard ranking.
    pub fn new(policy: AllocationPolicy) -> Self {
        Self {
            policy,
            ranking: RankingEngine::standard(),
        }
    }

    /// Replaces the ranking engine.
    pub fn with_ranking(mut self, ranking: RankingEngine) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Runs the allocation over one week.
    ///
    /// # Errors
    /// [`AllocationError::Policy`] if the policy is inconsistent,
    /// [`AllocationError::InvalidInput`] with every malformed slot, worker or
    /// tail entry. In both cases no slot has been decided.
    pub fn allocate(
        &self,
        request: &AllocationRequest,
    ) -> Result<AllocationResult, AllocationError> {
        self.policy.validate()?;
        let input =
            validation::prepare(request, &self.policy).map_err(AllocationError::InvalidInput)?;

        if request.workers.is_empty() {
            warn!("no workers supplied; every slot will be unassigned");
        }
        if request.slots.is_empty() {
            warn!("no slots supplied");
        }
        info!(
            workers = request.workers.len(),
            slots = request.slots.len(),
            "starting allocation run"
        );

        let mut state = RunState::new(input.profiles.len());
        let mut allocated = Vec::with_capacity(request.slots.len());

        for (slot, prepared) in request.slots.iter().zip(&input.slots) {
            let allocated_to = match self.select(prepared, &input, &state) {
                Some(worker_index) => {
                    state.commit(worker_index, prepared);
                    let name = &input.profiles[worker_index].name;
                    debug!(
                        slot = prepared.index,
                        day = %prepared.weekday,
                        location = %slot.location,
                        time = %prepared.time,
                        worker = %name,
                        "slot assigned"
                    );
                    Allocation::Assigned(name.clone())
                }
                None => {
                    debug!(
                        slot = prepared.index,
                        day = %prepared.weekday,
                        location = %slot.location,
                        time = %prepared.time,
                        "no eligible worker; slot unassigned"
                    );
                    Allocation::Unassigned
                }
            };

            allocated.push(AllocatedSlot {
                slot: slot.clone(),
                weekday: prepared.weekday,
                shift_type: prepared.shift_type,
                duration_hours: prepared.duration_hours,
                allocated_to,
            });
        }

        let loads = input
            .profiles
            .iter()
            .map(|p| {
                let ledger = state.ledger(p.index);
                WorkerLoad {
                    worker: p.name.clone(),
                    hours: ledger.hours(),
                    shifts: ledger.shift_count(),
                }
            })
            .collect();

        let result = AllocationResult {
            slots: allocated,
            loads,
        };
        info!(
            assigned = result.assigned_count(),
            unassigned = result.unassigned_count(),
            "allocation run finished"
        );
        Ok(result)
    }

    /// Picks the best eligible worker for `slot`.
    fn select(
        &self,
        slot: &PreparedSlot,
        input: &PreparedInput,
        state: &RunState,
    ) -> Option<usize> {
        let candidates: Vec<Candidate<'_>> = input
            .profiles
            .iter()
            .filter_map(|profile| {
                let ledger = state.ledger(profile.index);
                let tail = input.tails[profile.index].as_ref();
                match eligibility::check(profile, ledger, tail, slot, &self.policy) {
                    Ok(()) => Some(Candidate {
                        profile,
                        committed_hours: ledger.hours(),
                        committed_shifts: ledger.shift_count(),
                    }),
                    Err(reason) => {
                        trace!(
                            slot = slot.index,
                            worker = %profile.name,
                            %reason,
                            "worker ineligible"
                        );
                        None
                    }
                }
            })
            .collect();

        self.ranking
            .select_best(&candidates)
            .map(|i| candidates[i].profile.index)
    }
}
