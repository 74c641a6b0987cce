//! Schedule aggregate - The ordered rules of one character
//!
//! A schedule is produced by a definition parser and handed to the
//! collection fully formed. Declaration order is preserved because it is
//! the final tie-break during resolution.

use crate::entities::ScheduleEntry;
use crate::game_time::TimeOfDay;
use crate::ids::CharacterId;
use crate::value_objects::ConditionEvaluator;

/// A matching entry together with its position and query-time score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub declaration_index: usize,
    pub specificity: u8,
    pub entry: &'a ScheduleEntry,
}

/// Ordered placement rules belonging to one character.
///
/// # Invariants
///
/// - Entries keep source declaration order and are never reordered or removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    character_id: CharacterId,
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new(character_id: CharacterId, entries: Vec<ScheduleEntry>) -> Self {
        Self {
            character_id,
            entries,
        }
    }

    pub fn character_id(&self) -> &CharacterId {
        &self.character_id
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lazily yields every entry that matches `time`, in declaration order.
    ///
    /// Each call re-evaluates conditions; the iterator is not restartable.
    pub fn find_candidates<'a, 'q>(
        &'a self,
        time: &'q TimeOfDay,
        evaluator: Option<&'q dyn ConditionEvaluator>,
    ) -> impl Iterator<Item = Candidate<'a>> + 'q
    where
        'a: 'q,
    {
        self.entries
            .iter()
            .enumerate()
            .filter_map(move |(declaration_index, entry)| {
                let specificity = entry.specificity_at(time)?;
                entry.condition_holds(evaluator).then_some(Candidate {
                    declaration_index,
                    specificity,
                    entry,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_time::{TimeBlock, Weekday};
    use crate::ids::LocationId;
    use crate::value_objects::{Condition, DaySet, TimeRange};

    fn entry(location: &str, days: DaySet, range: TimeRange) -> ScheduleEntry {
        ScheduleEntry::builder(LocationId::new(location).unwrap())
            .window(days, range)
            .build()
            .unwrap()
    }

    fn create_test_schedule() -> Schedule {
        Schedule::new(
            CharacterId::new("margaret").unwrap(),
            vec![
                entry("bakery", DaySet::weekdays(), TimeRange::whole_day()),
                entry("square", DaySet::any(), TimeRange::single(TimeBlock::Evening)),
                entry("home", DaySet::any(), TimeRange::single(TimeBlock::Night)),
                entry(
                    "chapel",
                    DaySet::single(Weekday::Sunday),
                    TimeRange::single(TimeBlock::Morning),
                ),
            ],
        )
    }

    #[test]
    fn candidates_keep_declaration_order() {
        let schedule = create_test_schedule();
        let time = TimeOfDay::new(Weekday::Wednesday, TimeBlock::Evening);

        let found: Vec<(usize, &str)> = schedule
            .find_candidates(&time, None)
            .map(|c| (c.declaration_index, c.entry.location_id().as_str()))
            .collect();

        assert_eq!(found, vec![(0, "bakery"), (1, "square")]);
    }

    #[test]
    fn candidates_carry_query_time_specificity() {
        let schedule = create_test_schedule();
        let time = TimeOfDay::new(Weekday::Sunday, TimeBlock::Morning);

        let found: Vec<Candidate<'_>> = schedule.find_candidates(&time, None).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specificity, 4);
        assert_eq!(found[0].entry.location_id().as_str(), "chapel");
    }

    #[test]
    fn conditioned_entries_need_an_evaluator() {
        let conditioned = ScheduleEntry::builder(LocationId::new("ballroom").unwrap())
            .window(DaySet::any(), TimeRange::whole_day())
            .condition(Condition::new("invited").unwrap())
            .build()
            .unwrap();
        let schedule = Schedule::new(CharacterId::new("elena").unwrap(), vec![conditioned]);
        let time = TimeOfDay::new(Weekday::Friday, TimeBlock::Evening);

        assert_eq!(schedule.find_candidates(&time, None).count(), 0);

        let always = |_: &Condition| true;
        assert_eq!(schedule.find_candidates(&time, Some(&always)).count(), 1);
    }

    #[test]
    fn empty_schedule_yields_nothing() {
        let schedule = Schedule::new(CharacterId::new("doc").unwrap(), Vec::new());
        assert!(schedule.is_empty());
        let time = TimeOfDay::new(Weekday::Monday, TimeBlock::Morning);
        assert!(schedule.find_candidates(&time, None).next().is_none());
    }
}
