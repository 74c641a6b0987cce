//! Schedule resolution
//!
//! Picks the single authoritative entry for a character at a point in time:
//!
//! 1. Schedules are consulted in reverse registration order, so later
//!    (override) sources come first.
//! 2. The first schedule with any matching entry decides. Earlier sources are
//!    not consulted at all for this query, even if they would also match.
//! 3. Within that schedule the highest query-time specificity wins, and ties
//!    go to the earliest declared entry.

use crate::aggregates::{Candidate, Schedule};
use crate::entities::ScheduleEntry;
use crate::game_time::TimeOfDay;
use crate::value_objects::ConditionEvaluator;

/// The winning entry of a resolution query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub entry: &'a ScheduleEntry,
    /// Registration index of the schedule the entry came from.
    pub source_index: usize,
    /// Position of the entry within its schedule.
    pub declaration_index: usize,
    /// Query-time specificity the entry won with.
    pub specificity: u8,
}

/// Resolve against a character's schedules, given in registration order.
///
/// Returns `None` when no source has an applicable entry.
pub fn resolve<'a>(
    schedules: &'a [Schedule],
    time: &TimeOfDay,
    evaluator: Option<&dyn ConditionEvaluator>,
) -> Option<Resolution<'a>> {
    schedules
        .iter()
        .enumerate()
        .rev()
        .find_map(|(source_index, schedule)| {
            best_candidate(schedule.find_candidates(time, evaluator)).map(|winner| Resolution {
                entry: winner.entry,
                source_index,
                declaration_index: winner.declaration_index,
                specificity: winner.specificity,
            })
        })
}

/// Highest specificity, earliest declaration on ties.
fn best_candidate<'a>(candidates: impl Iterator<Item = Candidate<'a>>) -> Option<Candidate<'a>> {
    candidates.fold(None, |best: Option<Candidate<'a>>, candidate| match best {
        Some(current) if current.specificity >= candidate.specificity => Some(current),
        _ => Some(candidate),
    })
}
