//! Weekly shift allocation for the U-Engine ecosystem.
//!
//! Assigns a roster of workers to one week of location/time shift slots,
//! respecting day preferences, location qualifications, rest periods and
//! workload caps. The engine is a deterministic greedy heuristic: slots are
//! decided one at a time in input order and never revisited.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Worker`, `ShiftSlot`, `TimeRange`,
//!   `Weekday`, `DayPreference`, `Allocation`, `AllocatedSlot`
//! - **`policy`**: Engine parameters: rest minutes, hour and shift caps,
//!   shift-type boundaries
//! - **`validation`**: Input integrity checks and post-run allocation audit
//! - **`ranking`**: Composable rules that order eligible workers
//! - **`allocator`**: The allocation run itself
//! - **`roster`**: Per-worker weekly grid and coverage metrics
//!
//! # Architecture
//!
//! This crate sits at Layer 3 (Frameworks) in the U-Engine ecosystem. It
//! performs no I/O: callers load workers and slots, run the allocator, and
//! persist or render the result themselves.
//!
//! # Example
//!
//! ```
//! use u_roster::allocator::{AllocationRequest, Allocator};
//! use u_roster::models::{DayPreference, ShiftSlot, Weekday, Worker};
//! use u_roster::roster::RosterSummary;
//!
//! let workers = vec![
//!     Worker::new("Ana")
//!         .with_preference(Weekday::Sunday, DayPreference::Any)
//!         .with_preference(Weekday::Monday, DayPreference::Early)
//!         .with_location("Depot"),
//! ];
//! let slots = vec![
//!     ShiftSlot::new("Sunday", "Depot", "2200-0600"),
//!     ShiftSlot::new("Monday", "Depot", "0800-1600"),
//! ];
//!
//! let result = Allocator::default()
//!     .allocate(&AllocationRequest::new(workers, slots))
//!     .unwrap();
//! let roster = RosterSummary::from_allocation(&result);
//!
//! // Monday starts two hours after Sunday's overnight shift ends.
//! assert_eq!(roster.assigned_slots, 1);
//! assert_eq!(roster.unassigned, vec![1]);
//! ```

pub mod allocator;
pub mod error;
pub mod models;
pub mod policy;
pub mod ranking;
pub mod roster;
pub mod validation;

pub use allocator::{AllocationRequest, AllocationResult, Allocator};
pub use error::{AllocationError, PolicyError};
