//! Allocation policy.
//!
//! Every numeric rule the engine applies is a named parameter here rather
//! than a literal in the allocator. Defaults reproduce the standard policy:
//! 12 hours of rest between shifts, at most 72 hours and 5 shifts per worker
//! per week, early shifts from 06:00, late from 14:00, night from 22:00.
//!
//! Policies can be built in code or loaded from TOML:
//!
//! ```
//! use u_roster::policy::AllocationPolicy;
//!
//! let policy = AllocationPolicy::from_toml_str(
//!     r#"
//!     weekly_hour_cap = 60.0
//!     cross_week_rest = false
//!
//!     [shift_boundaries]
//!     early_start = 300
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(policy.weekly_hour_cap, 60.0);
//! assert_eq!(policy.min_rest_minutes, 720);
//! assert_eq!(policy.shift_boundaries.early_start, 300);
//! assert_eq!(policy.shift_boundaries.late_start, 840);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::models::{ShiftType, TimeRange, MINUTES_PER_DAY};

/// Start-minute thresholds for shift-type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftBoundaries {
    /// First minute of the early band.
    pub early_start: u16,
    /// First minute of the late band (end of early).
    pub late_start: u16,
    /// First minute of the night band (end of late).
    pub night_start: u16,
}

impl Default for ShiftBoundaries {
    fn default() -> Self {
        Self {
            early_start: 6 * 60,
            late_start: 14 * 60,
            night_start: 22 * 60,
        }
    }
}

impl ShiftBoundaries {
    /// Classifies a range by its start minute.
    ///
    /// `[early_start, late_start)` is early, `[late_start, night_start)` is
    /// late, everything else (including the small hours) is night.
    pub fn classify(&self, range: &TimeRange) -> ShiftType {
        let start = range.start_min;
        if start >= self.early_start && start < self.late_start {
            ShiftType::Early
        } else if start >= self.late_start && start < self.night_start {
            ShiftType::Late
        } else {
            ShiftType::Night
        }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        let ordered = self.early_start < self.late_start
            && self.late_start < self.night_start
            && (self.night_start as i32) < MINUTES_PER_DAY;
        if ordered {
            Ok(())
        } else {
            Err(PolicyError::UnorderedBoundaries {
                early: self.early_start,
                late: self.late_start,
                night: self.night_start,
            })
        }
    }
}

/// Parameters of an allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    /// Minimum gap between the end of one shift and the start of the next.
    pub min_rest_minutes: u32,
    /// Maximum committed hours per worker per run.
    pub weekly_hour_cap: f64,
    /// Maximum committed slots per worker per run.
    pub max_shifts_per_worker: usize,
    /// Shift-type thresholds.
    pub shift_boundaries: ShiftBoundaries,
    /// Check Sunday slots against the worker's previous-Saturday shift.
    pub cross_week_rest: bool,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            min_rest_minutes: 720,
            weekly_hour_cap: 72.0,
            max_shifts_per_worker: 5,
            shift_boundaries: ShiftBoundaries::default(),
            cross_week_rest: true,
        }
    }
}

impl AllocationPolicy {
    /// Loads a policy from TOML; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, PolicyError> {
        let policy: Self = toml::from_str(source)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Sets the minimum rest between shifts.
    pub fn with_min_rest_minutes(mut self, minutes: u32) -> Self {
        self.min_rest_minutes = minutes;
        self
    }

    /// Sets the weekly hour cap.
    pub fn with_weekly_hour_cap(mut self, hours: f64) -> Self {
        self.weekly_hour_cap = hours;
        self
    }

    /// Sets the per-worker shift cap.
    pub fn with_max_shifts_per_worker(mut self, max: usize) -> Self {
        self.max_shifts_per_worker = max;
        self
    }

    /// Sets the shift-type thresholds.
    pub fn with_shift_boundaries(mut self, boundaries: ShiftBoundaries) -> Self {
        self.shift_boundaries = boundaries;
        self
    }

    /// Enables or disables the previous-week rest check.
    pub fn with_cross_week_rest(mut self, enabled: bool) -> Self {
        self.cross_week_rest = enabled;
        self
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), PolicyError> {
        self.shift_boundaries.validate()?;
        if !(self.weekly_hour_cap.is_finite() && self.weekly_hour_cap > 0.0) {
            return Err(PolicyError::InvalidHourCap(self.weekly_hour_cap));
        }
        if self.max_shifts_per_worker == 0 {
            return Err(PolicyError::ZeroShiftCap);
        }
        // Rest longer than a week can never be satisfied by adjacent days.
        let max = 7 * MINUTES_PER_DAY as u32;
        if self.min_rest_minutes > max {
            return Err(PolicyError::RestTooLong {
                actual: self.min_rest_minutes,
                max,
            });
        }
        Ok(())
    }
}
