//! Error types for allocation runs.
//!
//! An unfilled slot is not an error; these cover inputs the engine refuses
//! to run on.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by [`Allocator::allocate`](crate::allocator::Allocator::allocate).
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Workers, slots or prior-week tail failed validation. No slot was decided.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The policy is internally inconsistent.
    #[error("invalid policy: {0}")]
    Policy(#[from] PolicyError),
}

impl AllocationError {
    /// Validation errors, if this is an input error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            AllocationError::InvalidInput(errors) => errors,
            AllocationError::Policy(_) => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Problems with an [`AllocationPolicy`](crate::policy::AllocationPolicy).
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("unordered shift boundaries {early}/{late}/{night}: need early < late < night < 1440")]
    UnorderedBoundaries { early: u16, late: u16, night: u16 },

    #[error("weekly hour cap must be a positive number, got {0}")]
    InvalidHourCap(f64),

    #[error("max shifts per worker must be at least 1")]
    ZeroShiftCap,

    #[error("minimum rest must not exceed {max} minutes, got {actual}")]
    RestTooLong { actual: u32, max: u32 },

    #[error("failed to parse policy: {0}")]
    Parse(#[from] toml::de::Error),
}
