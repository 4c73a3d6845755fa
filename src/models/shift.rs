//! Shift types and worker day preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Weekday;

/// Coarse classification of a shift by its start time.
///
/// Boundaries are a policy concern, see
/// [`ShiftBoundaries`](crate::policy::ShiftBoundaries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Early,
    Late,
    Night,
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShiftType::Early => "early",
            ShiftType::Late => "late",
            ShiftType::Night => "night",
        })
    }
}

/// What a worker is willing to work on one day.
///
/// Serialized as kebab-case; deserialized through [`FromStr`], so registry
/// files accept the same spellings as the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum DayPreference {
    /// Not working that day.
    #[default]
    NotAvailable,
    /// Early shifts only.
    Early,
    /// Late shifts only.
    Late,
    /// Any shift type.
    Any,
}

impl DayPreference {
    /// Whether the worker is available at all.
    #[inline]
    pub fn is_available(self) -> bool {
        self != DayPreference::NotAvailable
    }

    /// Whether a shift of the given type may be assigned.
    pub fn accepts(self, shift_type: ShiftType) -> bool {
        match self {
            DayPreference::NotAvailable => false,
            DayPreference::Any => true,
            DayPreference::Early => shift_type == ShiftType::Early,
            DayPreference::Late => shift_type == ShiftType::Late,
        }
    }
}

/// Error returned when a day preference is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day preference '{0}'")]
pub struct ParseDayPreferenceError(pub String);

impl FromStr for DayPreference {
    type Err = ParseDayPreferenceError;

    /// Case-insensitive; spaces and underscores count as `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match key.as_str() {
            "" | "not-available" | "n/a" | "none" | "off" => Ok(DayPreference::NotAvailable),
            "early" => Ok(DayPreference::Early),
            "late" => Ok(DayPreference::Late),
            "any" => Ok(DayPreference::Any),
            _ => Err(ParseDayPreferenceError(s.to_string())),
        }
    }
}

impl TryFrom<String> for DayPreference {
    type Error = ParseDayPreferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One preference per weekday.
///
/// Missing days deserialize as `NotAvailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekPreferences {
    pub sunday: DayPreference,
    pub monday: DayPreference,
    pub tuesday: DayPreference,
    pub wednesday: DayPreference,
    pub thursday: DayPreference,
    pub friday: DayPreference,
    pub saturday: DayPreference,
}

impl WeekPreferences {
    /// Same preference on every day.
    pub fn uniform(preference: DayPreference) -> Self {
        Self {
            sunday: preference,
            monday: preference,
            tuesday: preference,
            wednesday: preference,
            thursday: preference,
            friday: preference,
            saturday: preference,
        }
    }

    /// Preference for a day.
    pub fn get(&self, day: Weekday) -> DayPreference {
        match day {
            Weekday::Sunday => self.sunday,
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
            Weekday::Saturday => self.saturday,
        }
    }

    /// Sets the preference for a day.
    pub fn set(&mut self, day: Weekday, preference: DayPreference) {
        let slot = match day {
            Weekday::Sunday => &mut self.sunday,
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
        };
        *slot = preference;
    }

    /// Number of days with any availability.
    pub fn available_days(&self) -> usize {
        Weekday::ALL
            .iter()
            .filter(|&&d| self.get(d).is_available())
            .count()
    }

    /// Available on Saturday or Sunday.
    pub fn weekend_available(&self) -> bool {
        self.saturday.is_available() || self.sunday.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        assert!(DayPreference::Any.accepts(ShiftType::Night));
        assert!(DayPreference::Early.accepts(ShiftType::Early));
        assert!(!DayPreference::Early.accepts(ShiftType::Late));
        assert!(!DayPreference::Late.accepts(ShiftType::Night));
        assert!(!DayPreference::NotAvailable.accepts(ShiftType::Early));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ANY".parse::<DayPreference>(), Ok(DayPreference::Any));
        assert_eq!(" early".parse::<DayPreference>(), Ok(DayPreference::Early));
        assert_eq!("".parse::<DayPreference>(), Ok(DayPreference::NotAvailable));
        assert_eq!(
            "Not Available".parse::<DayPreference>(),
            Ok(DayPreference::NotAvailable)
        );
        assert_eq!(
            "whenever".parse::<DayPreference>(),
            Err(ParseDayPreferenceError("whenever".into()))
        );
    }

    #[test]
    fn test_week_counts() {
        let mut week = WeekPreferences::default();
        assert_eq!(week.available_days(), 0);
        assert!(!week.weekend_available());

        week.set(Weekday::Monday, DayPreference::Early);
        week.set(Weekday::Tuesday, DayPreference::Any);
        assert_eq!(week.available_days(), 2);
        assert!(!week.weekend_available());

        week.set(Weekday::Sunday, DayPreference::Late);
        assert_eq!(week.available_days(), 3);
        assert!(week.weekend_available());
        assert_eq!(week.get(Weekday::Sunday), DayPreference::Late);

        assert_eq!(WeekPreferences::uniform(DayPreference::Any).available_days(), 7);
    }

    #[test]
    fn test_deserialize_partial_week() {
        let week: WeekPreferences =
            serde_json::from_str(r#"{"monday":"any","friday":"not-available","saturday":"late"}"#)
                .unwrap();
        assert_eq!(week.monday, DayPreference::Any);
        assert_eq!(week.friday, DayPreference::NotAvailable);
        assert_eq!(week.saturday, DayPreference::Late);
        assert_eq!(week.sunday, DayPreference::NotAvailable);
    }

    #[test]
    fn test_deserialize_matches_parser() {
        let week: WeekPreferences = serde_json::from_str(
            r#"{"monday":"ANY","tuesday":"Not-Available","wednesday":"n/a","thursday":"Early"}"#,
        )
        .unwrap();
        assert_eq!(week.monday, DayPreference::Any);
        assert_eq!(week.tuesday, DayPreference::NotAvailable);
        assert_eq!(week.wednesday, DayPreference::NotAvailable);
        assert_eq!(week.thursday, DayPreference::Early);

        assert!(serde_json::from_str::<DayPreference>(r#""whenever""#).is_err());
        assert_eq!(
            serde_json::to_string(&DayPreference::NotAvailable).unwrap(),
            r#""not-available""#
        );
    }
}
