//! Worker model.
//!
//! Workers come from the caller's registry: a unique name, a per-day shift
//! preference and the set of locations they are qualified to staff.

use serde::{Deserialize, Serialize};

use super::{canonical_location, DayPreference, WeekPreferences, Weekday};

/// A worker that can be allocated to shift slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique name, used as the allocation key.
    pub name: String,
    /// Shift preference per weekday.
    #[serde(default)]
    pub preferences: WeekPreferences,
    /// Locations the worker may staff (matched case-insensitively).
    #[serde(default)]
    pub locations: Vec<String>,
}

impl Worker {
    /// Creates a worker with no availability and no locations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preferences: WeekPreferences::default(),
            locations: Vec::new(),
        }
    }

    /// Sets the preference for one day.
    pub fn with_preference(mut self, day: Weekday, preference: DayPreference) -> Self {
        self.preferences.set(day, preference);
        self
    }

    /// Replaces the whole week of preferences.
    pub fn with_preferences(mut self, preferences: WeekPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Adds a qualified location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.locations.push(location.into());
        self
    }

    /// Whether the worker may staff `location`.
    pub fn is_qualified_for(&self, location: &str) -> bool {
        let wanted = canonical_location(location);
        self.locations
            .iter()
            .any(|l| canonical_location(l) == wanted)
    }

    /// Preference for a day.
    #[inline]
    pub fn preference(&self, day: Weekday) -> DayPreference {
        self.preferences.get(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_builder() {
        let w = Worker::new("Ana")
            .with_preference(Weekday::Monday, DayPreference::Early)
            .with_preference(Weekday::Saturday, DayPreference::Any)
            .with_location("Depot")
            .with_location("North Gate");

        assert_eq!(w.name, "Ana");
        assert_eq!(w.preference(Weekday::Monday), DayPreference::Early);
        assert_eq!(w.preference(Weekday::Tuesday), DayPreference::NotAvailable);
        assert_eq!(w.preferences.available_days(), 2);
        assert_eq!(w.locations.len(), 2);
    }

    #[test]
    fn test_location_case_insensitive() {
        let w = Worker::new("Ana").with_location(" Depot ");
        assert!(w.is_qualified_for("depot"));
        assert!(w.is_qualified_for("DEPOT"));
        assert!(!w.is_qualified_for("Warehouse"));
    }

    #[test]
    fn test_deserialize_registry_row() {
        let w: Worker = serde_json::from_str(
            r#"{
                "name": "Ben",
                "preferences": {"monday": "late", "sunday": "any"},
                "locations": ["Depot"]
            }"#,
        )
        .unwrap();
        assert_eq!(w.preference(Weekday::Monday), DayPreference::Late);
        assert!(w.preferences.weekend_available());
        assert!(w.is_qualified_for("depot"));
    }
}
