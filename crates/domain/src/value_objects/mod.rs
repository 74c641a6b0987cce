//! Value objects - Immutable objects defined by their attributes

mod condition;
mod window;

pub use condition::{Condition, ConditionEvaluator};
pub use window::{DaySet, TimeRange, Window, NARROW_RANGE_SCORE, SINGLE_DAY_SCORE};

#[cfg(test)]
pub use condition::MockConditionEvaluator;
