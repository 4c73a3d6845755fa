//! Rule engine for multi-criteria candidate ranking.
//!
//! Rules are applied in sequence; a later rule is consulted only when all
//! earlier rules tie within `epsilon`. Sorting is stable, so candidates that
//! tie on every rule stay in the order they were supplied.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, Candidate, RankingRule, RuleScore};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep supplied (registry) order.
    #[default]
    InputOrder,
    /// Lexicographic by worker name.
    ByName,
}

/// A composable, sequential ranking engine.
#[derive(Clone)]
pub struct RankingEngine {
    rules: Vec<Arc<dyn RankingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RankingEngine {
    /// Creates an empty engine (every candidate ties).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// The standard chain: most available days, weekend availability,
    /// fewest committed hours.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::MostAvailableDays)
            .with_rule(rules::WeekendAvailable)
            .with_rule(rules::FewestHours)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts candidates, best first.
    ///
    /// Returns indices into `candidates`.
    pub fn sort_indices(&self, candidates: &[Candidate<'_>]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&candidates[a], &candidates[b]));
        indices
    }

    /// Index of the best candidate.
    pub fn select_best(&self, candidates: &[Candidate<'_>]) -> Option<usize> {
        // First of equal candidates wins, same as the stable sort.
        (0..candidates.len()).reduce(|best, i| {
            if self.compare(&candidates[i], &candidates[best]) == Ordering::Less {
                i
            } else {
                best
            }
        })
    }

    /// Scores from each rule for one candidate.
    pub fn evaluate(&self, candidate: &Candidate<'_>) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(candidate)).collect()
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a);
            let score_b = rule.evaluate(b);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ByName => a.profile.name.cmp(&b.profile.name),
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::WorkerProfile;
    use crate::models::{DayPreference, Weekday, Worker};

    fn profile(index: usize, name: &str, days: &[Weekday]) -> WorkerProfile {
        let w = days.iter().fold(Worker::new(name), |w, &d| {
            w.with_preference(d, DayPreference::Any)
        });
        WorkerProfile::from_worker(index, &w)
    }

    fn candidate(profile: &WorkerProfile, hours: f64) -> Candidate<'_> {
        Candidate {
            profile,
            committed_hours: hours,
            committed_shifts: 0,
        }
    }

    const WEEKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    #[test]
    fn test_available_days_beat_hours() {
        let a = profile(0, "A", &WEEKDAYS);
        let b = profile(1, "B", &WEEKDAYS[..3]);
        // A has worked far more, but broader availability wins.
        let candidates = vec![candidate(&b, 0.0), candidate(&a, 40.0)];
        let engine = RankingEngine::standard();
        assert_eq!(engine.select_best(&candidates), Some(1));
    }

    #[test]
    fn test_weekend_breaks_day_tie() {
        let weekday = profile(0, "A", &[Weekday::Monday, Weekday::Tuesday]);
        let weekend = profile(1, "B", &[Weekday::Monday, Weekday::Sunday]);
        let candidates = vec![candidate(&weekday, 0.0), candidate(&weekend, 20.0)];
        let engine = RankingEngine::standard();
        assert_eq!(engine.sort_indices(&candidates), vec![1, 0]);
    }

    #[test]
    fn test_hours_break_remaining_tie() {
        let a = profile(0, "A", &[Weekday::Monday]);
        let b = profile(1, "B", &[Weekday::Monday]);
        let candidates = vec![candidate(&a, 16.0), candidate(&b, 8.0)];
        assert_eq!(RankingEngine::standard().select_best(&candidates), Some(1));
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let a = profile(0, "Zed", &[Weekday::Monday]);
        let b = profile(1, "Amy", &[Weekday::Monday]);
        let candidates = vec![candidate(&a, 8.0), candidate(&b, 8.0)];

        let engine = RankingEngine::standard();
        assert_eq!(engine.select_best(&candidates), Some(0));
        assert_eq!(engine.sort_indices(&candidates), vec![0, 1]);

        let by_name = RankingEngine::standard().with_tie_breaker(TieBreaker::ByName);
        assert_eq!(by_name.select_best(&candidates), Some(1));
    }

    #[test]
    fn test_empty_candidates() {
        let engine = RankingEngine::standard();
        assert!(engine.sort_indices(&[]).is_empty());
        assert!(engine.select_best(&[]).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let p = profile(0, "A", &[Weekday::Monday, Weekday::Saturday]);
        let scores = RankingEngine::standard().evaluate(&candidate(&p, 12.5));
        assert_eq!(scores.len(), 3);
        assert!((scores[0] + 2.0).abs() < 1e-10);
        assert!((scores[1] - 0.0).abs() < 1e-10);
        assert!((scores[2] - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_debug_lists_rules() {
        let dbg = format!("{:?}", RankingEngine::standard());
        assert!(dbg.contains("MOST_AVAILABLE_DAYS"));
        assert!(dbg.contains("FEWEST_HOURS"));
    }
}
