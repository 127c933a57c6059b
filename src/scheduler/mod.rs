//! Schedule planning passes and duration estimates.
//!
//! `SchedulePlanner` derives the full dated schedule from a catalog
//! and a target start date: preparation phases backward so they finish
//! the business day before construction begins, construction phases
//! forward in catalog order. `rechain_following` re-derives dates when
//! a row moves, and `ProjectEstimate` aggregates catalog durations for
//! display before any schedule exists.

mod estimate;
mod planner;
mod rechain;

pub use estimate::ProjectEstimate;
pub use planner::SchedulePlanner;
pub use rechain::rechain_following;
