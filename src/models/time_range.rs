//! Time range model.
//!
//! Shift times are written as `HHMM-HHMM` (e.g. `0600-1400`, colons
//! allowed: `06:00-14:00`). Both ends are normalised to minutes since
//! midnight. A range whose end is at or before its start crosses midnight,
//! so `2200-0600` is an 8 hour overnight shift and `0600-0600` is 24 hours.
//!
//! # Week timeline
//! Rest periods are measured on an absolute timeline where minute 0 is
//! midnight at the start of the week's first day. A shift on day `d`
//! occupies `[d * 1440 + start, d * 1440 + start + duration)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// A daily time range in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start minute (0..1440).
    pub start_min: u16,
    /// End minute (0..1440). At or before `start_min` means next day.
    pub end_min: u16,
}

/// Why a time range failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTimeRangeError {
    /// No `-` separator between the two ends.
    #[error("expected 'HHMM-HHMM'")]
    MissingSeparator,
    /// One end is not a 3 or 4 digit `HHMM` value.
    #[error("'{0}' is not an HHMM clock value")]
    InvalidClock(String),
    /// Hour above 23 or minute above 59.
    #[error("'{0}' is not a valid time of day")]
    OutOfRange(String),
}

impl TimeRange {
    /// Creates a range from minutes since midnight.
    ///
    /// Values are wrapped into a single day.
    pub fn from_minutes(start_min: u16, end_min: u16) -> Self {
        let day = MINUTES_PER_DAY as u16;
        Self {
            start_min: start_min % day,
            end_min: end_min % day,
        }
    }

    /// Whether the range runs past midnight into the next day.
    #[inline]
    pub fn crosses_midnight(&self) -> bool {
        self.end_min <= self.start_min
    }

    /// Length in minutes, always in `1..=1440`.
    pub fn duration_minutes(&self) -> i32 {
        let raw = self.end_min as i32 - self.start_min as i32;
        if self.crosses_midnight() {
            raw + MINUTES_PER_DAY
        } else {
            raw
        }
    }

    /// Length in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    /// Absolute start minute when the shift is worked on week day `day_index`.
    ///
    /// `day_index` may be negative for days of the previous week.
    pub fn absolute_start(&self, day_index: i32) -> i32 {
        day_index * MINUTES_PER_DAY + self.start_min as i32
    }

    /// Absolute end minute when the shift is worked on week day `day_index`.
    pub fn absolute_end(&self, day_index: i32) -> i32 {
        self.absolute_start(day_index) + self.duration_minutes()
    }
}

/// Forward gap in minutes from the end of `earlier` (worked on
/// `earlier_day`) to the start of `later` (worked on `later_day`).
///
/// Negative when the two shifts overlap.
pub fn rest_gap_minutes(
    earlier: &TimeRange,
    earlier_day: i32,
    later: &TimeRange,
    later_day: i32,
) -> i32 {
    later.absolute_start(later_day) - earlier.absolute_end(earlier_day)
}

fn parse_clock(raw: &str) -> Result<u16, ParseTimeRangeError> {
    let digits: String = raw.trim().chars().filter(|c| *c != ':').collect();
    if !(3..=4).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseTimeRangeError::InvalidClock(raw.trim().to_string()));
    }
    let value: u16 = digits
        .parse()
        .map_err(|_| ParseTimeRangeError::InvalidClock(raw.trim().to_string()))?;
    let (hours, minutes) = (value / 100, value % 100);
    if hours > 23 || minutes > 59 {
        return Err(ParseTimeRangeError::OutOfRange(raw.trim().to_string()));
    }
    Ok(hours * 60 + minutes)
}

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or(ParseTimeRangeError::MissingSeparator)?;
        Ok(Self {
            start_min: parse_clock(start)?,
            end_min: parse_clock(end)?,
        })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{:02}-{:02}{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}
