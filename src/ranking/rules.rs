//! Built-in ranking rules.
//!
//! # Score Convention
//! All rules return lower scores for preferred candidates.

use super::{Candidate, RankingRule, RuleScore};

/// More days with any availability ranks first.
///
/// Spreads load toward workers with broad general availability.
#[derive(Debug, Clone, Copy)]
pub struct MostAvailableDays;

impl RankingRule for MostAvailableDays {
    fn name(&self) -> &'static str {
        "MOST_AVAILABLE_DAYS"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        -(candidate.profile.available_days as f64)
    }

    fn description(&self) -> &'static str {
        "Most available days per week"
    }
}

/// Weekend availability (Saturday or Sunday) ranks first.
#[derive(Debug, Clone, Copy)]
pub struct WeekendAvailable;

impl RankingRule for WeekendAvailable {
    fn name(&self) -> &'static str {
        "WEEKEND_AVAILABLE"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        if candidate.profile.weekend_available {
            0.0
        } else {
            1.0
        }
    }

    fn description(&self) -> &'static str {
        "Available on the weekend"
    }
}

/// Fewer hours committed so far ranks first.
#[derive(Debug, Clone, Copy)]
pub struct FewestHours;

impl RankingRule for FewestHours {
    fn name(&self) -> &'static str {
        "FEWEST_HOURS"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.committed_hours
    }

    fn description(&self) -> &'static str {
        "Fewest hours committed this run"
    }
}

/// Fewer shifts committed so far ranks first.
///
/// Not part of the standard chain; useful when slots vary widely in length.
#[derive(Debug, Clone, Copy)]
pub struct FewestShifts;

impl RankingRule for FewestShifts {
    fn name(&self) -> &'static str {
        "FEWEST_SHIFTS"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.committed_shifts as f64
    }

    fn description(&self) -> &'static str {
        "Fewest shifts committed this run"
    }
}
