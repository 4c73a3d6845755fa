//! Weekday model.
//!
//! A roster week runs Sunday through Saturday. Day names arrive as free
//! text from the station registry and are normalised here once; everything
//! downstream works with the `Weekday` enum and its index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the roster week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All days in week order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Position within the week (Sunday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a week position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Previous day within the same week (`None` for Sunday).
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Next day within the same week (`None` for Saturday).
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// First day of the week.
    #[inline]
    pub fn is_first(self) -> bool {
        self == Weekday::Sunday
    }

    /// Saturday or Sunday.
    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Lower-case English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a day name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised day name '{0}'")]
pub struct ParseWeekdayError(pub String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    /// Case-insensitive, surrounding whitespace ignored. Accepts full names
    /// and three-letter abbreviations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let day = match key.as_str() {
            "sunday" | "sun" => Weekday::Sunday,
            "monday" | "mon" => Weekday::Monday,
            "tuesday" | "tue" => Weekday::Tuesday,
            "wednesday" | "wed" => Weekday::Wednesday,
            "thursday" | "thu" => Weekday::Thursday,
            "friday" | "fri" => Weekday::Friday,
            "saturday" | "sat" => Weekday::Saturday,
            _ => return Err(ParseWeekdayError(s.to_string())),
        };
        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Monday".parse::<Weekday>(), Ok(Weekday::Monday));
        assert_eq!("  SUNDAY ".parse::<Weekday>(), Ok(Weekday::Sunday));
        assert_eq!("sat".parse::<Weekday>(), Ok(Weekday::Saturday));
        assert!("Funday".parse::<Weekday>().is_err());
        assert!("".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_week_order() {
        assert_eq!(Weekday::Sunday.index(), 0);
        assert_eq!(Weekday::Saturday.index(), 6);
        assert_eq!(Weekday::Sunday.previous(), None);
        assert_eq!(Weekday::Sunday.next(), Some(Weekday::Monday));
        assert_eq!(Weekday::Saturday.next(), None);
        assert_eq!(Weekday::Wednesday.previous(), Some(Weekday::Tuesday));
        assert!(Weekday::Sunday.is_first());
    }

    #[test]
    fn test_weekend() {
        assert!(Weekday::Saturday.is_weekend());
        assert!(Weekday::Sunday.is_weekend());
        assert!(!Weekday::Friday.is_weekend());
    }
}
