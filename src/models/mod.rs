//! Rostering domain models.
//!
//! Input types mirror what the surrounding application keeps in its
//! registries (workers, stations/slots); output types carry the allocation
//! outcome for each slot.
//!
//! # Domain Mappings
//!
//! | u-roster | Retail | Healthcare | Logistics |
//! |----------|--------|------------|-----------|
//! | Worker | Shop assistant | Nurse | Driver |
//! | ShiftSlot | Till shift | Ward shift | Depot shift |
//! | Location | Store | Ward | Depot |

mod day;
mod shift;
mod slot;
mod time_range;
mod worker;

pub use day::{ParseWeekdayError, Weekday};
pub use shift::{DayPreference, ParseDayPreferenceError, ShiftType, WeekPreferences};
pub use slot::{canonical_location, AllocatedSlot, Allocation, ShiftSlot, UNASSIGNED};
pub use time_range::{rest_gap_minutes, ParseTimeRangeError, TimeRange, MINUTES_PER_DAY};
pub use worker::Worker;
