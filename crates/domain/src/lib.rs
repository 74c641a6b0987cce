//! Whereabouts domain: where non-player characters should be, and when.
//!
//! Pure, synchronous types. No I/O happens here; definition parsing and
//! orchestration live in `whereabouts-engine`.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod game_time;
pub mod ids;
pub mod resolution;
pub mod value_objects;

pub use aggregates::{Candidate, CollectionPhase, Schedule, ScheduleCollection};
pub use entities::{ScheduleEntry, ScheduleEntryBuilder};
pub use error::DomainError;
pub use resolution::Resolution;

// Re-export game time types
pub use game_time::{
    GameTime, TimeBlock, TimeOfDay, Weekday, BLOCKS_PER_DAY, DAYS_PER_WEEK, DAY_START_HOUR,
};

// Re-export ID types
pub use ids::{CharacterId, LocationId};

pub use value_objects::{Condition, ConditionEvaluator, DaySet, TimeRange, Window};
