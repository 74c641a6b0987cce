//! Aggregates - Consistency boundaries for schedules
//!
//! - `Schedule`: one character's ordered entries from one definition source
//! - `ScheduleCollection`: all schedules, with the load/query phase flag

pub mod schedule;
pub mod schedule_collection;

pub use schedule::{Candidate, Schedule};
pub use schedule_collection::{CollectionPhase, ScheduleCollection};
