//! Ranking rules and rule engine for choosing among eligible workers.
//!
//! Each eligible worker is wrapped in a [`Candidate`] and scored by a chain
//! of [`RankingRule`]s. The engine compares rule by rule and falls through to
//! the next rule only on ties; workers that tie on every rule keep their
//! registry order.
//!
//! The standard chain is:
//! 1. [`rules::MostAvailableDays`]: broader weekly availability first
//! 2. [`rules::WeekendAvailable`]: weekend availability first
//! 3. [`rules::FewestHours`]: fewer hours committed so far first
//!
//! # Usage
//!
//! ```
//! use u_roster::ranking::{rules, RankingEngine};
//!
//! let engine = RankingEngine::new()
//!     .with_rule(rules::FewestHours)
//!     .with_rule(rules::MostAvailableDays);
//! assert_eq!(engine.rule_names(), vec!["FEWEST_HOURS", "MOST_AVAILABLE_DAYS"]);
//! ```

mod engine;
pub mod rules;

pub use engine::{RankingEngine, TieBreaker};

use crate::allocator::WorkerProfile;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = preferred.
pub type RuleScore = f64;

/// An eligible worker as seen by the ranking rules.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Per-run derived worker data.
    pub profile: &'a WorkerProfile,
    /// Hours committed earlier in this run.
    pub committed_hours: f64,
    /// Slots committed earlier in this run.
    pub committed_shifts: usize,
}

/// A rule that scores candidates for a slot.
///
/// # Score Convention
/// **Lower score = preferred.**
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FEWEST_HOURS").
    fn name(&self) -> &'static str;

    /// Scores a candidate; lower wins.
    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
