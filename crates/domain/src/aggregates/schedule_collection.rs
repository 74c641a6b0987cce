//! Schedule collection aggregate - Every schedule of every character
//!
//! # Lifecycle
//!
//! The collection has two phases:
//! - `Loading`: schedules may be registered, nothing has been resolved yet
//! - `Sealed`: entered by [`ScheduleCollection::seal`] or by the first
//!   [`ScheduleCollection::resolve`]; registration is rejected from then on
//!
//! Registration order matters: a schedule registered later for the same
//! character is a higher-priority override source.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::aggregates::Schedule;
use crate::error::DomainError;
use crate::game_time::TimeOfDay;
use crate::ids::CharacterId;
use crate::resolution::{self, Resolution};
use crate::value_objects::ConditionEvaluator;

/// Which lifecycle phase a collection is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPhase {
    Loading,
    Sealed,
}

impl fmt::Display for CollectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionPhase::Loading => write!(f, "loading"),
            CollectionPhase::Sealed => write!(f, "sealed"),
        }
    }
}

/// All schedules for all characters, grouped by character.
#[derive(Debug, Default)]
pub struct ScheduleCollection {
    schedules: HashMap<CharacterId, Vec<Schedule>>,
    sealed: AtomicBool,
}

impl ScheduleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `schedule` to `character_id`'s sources.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidStateTransition` once the collection is sealed
    /// - `DomainError::Validation` if the schedule belongs to another character
    pub fn register(
        &mut self,
        character_id: CharacterId,
        schedule: Schedule,
    ) -> Result<(), DomainError> {
        if self.is_sealed() {
            return Err(DomainError::invalid_state_transition(format!(
                "Cannot register a schedule for '{}': collection is sealed",
                character_id
            )));
        }
        if schedule.character_id() != &character_id {
            return Err(DomainError::validation(format!(
                "Schedule owned by '{}' cannot be registered for '{}'",
                schedule.character_id(),
                character_id
            )));
        }
        self.schedules
            .entry(character_id)
            .or_default()
            .push(schedule);
        Ok(())
    }

    /// Register `schedule` under its own owner.
    pub fn register_schedule(&mut self, schedule: Schedule) -> Result<(), DomainError> {
        self.register(schedule.character_id().clone(), schedule)
    }

    /// Resolve the authoritative entry for a character at `time`.
    ///
    /// Seals the collection. Returns `None` when nothing applies.
    pub fn resolve(
        &self,
        character_id: &CharacterId,
        time: &TimeOfDay,
        evaluator: Option<&dyn ConditionEvaluator>,
    ) -> Option<Resolution<'_>> {
        self.seal();
        let schedules = self.schedules.get(character_id)?;
        resolution::resolve(schedules, time, evaluator)
    }

    /// Close the loading phase.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> CollectionPhase {
        if self.is_sealed() {
            CollectionPhase::Sealed
        } else {
            CollectionPhase::Loading
        }
    }

    /// Schedules registered for a character, in registration order.
    pub fn schedules_for(&self, character_id: &CharacterId) -> &[Schedule] {
        self.schedules
            .get(character_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Characters with at least one schedule, sorted.
    pub fn characters(&self) -> Vec<&CharacterId> {
        let mut ids: Vec<&CharacterId> = self.schedules.keys().collect();
        ids.sort();
        ids
    }

    pub fn character_count(&self) -> usize {
        self.schedules.len()
    }

    /// Total number of registered schedules across all characters.
    pub fn len(&self) -> usize {
        self.schedules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ScheduleEntry;
    use crate::game_time::{TimeBlock, Weekday};
    use crate::ids::LocationId;
    use crate::value_objects::{DaySet, TimeRange};

    fn character(id: &str) -> CharacterId {
        CharacterId::new(id).unwrap()
    }

    fn single_entry(owner: &str, location: &str, day: Weekday, block: TimeBlock) -> Schedule {
        Schedule::new(
            character(owner),
            vec![ScheduleEntry::builder(LocationId::new(location).unwrap())
                .window(DaySet::single(day), TimeRange::single(block))
                .build()
                .unwrap()],
        )
    }

    fn location_of(
        collection: &ScheduleCollection,
        who: &str,
        day: Weekday,
        block: TimeBlock,
    ) -> Option<String> {
        collection
            .resolve(&character(who), &TimeOfDay::new(day, block), None)
            .map(|r| r.entry.location_id().to_string())
    }

    #[test]
    fn unknown_character_is_not_found() {
        let collection = ScheduleCollection::new();
        assert_eq!(
            location_of(&collection, "nobody", Weekday::Monday, TimeBlock::Morning),
            None
        );
    }

    #[test]
    fn override_schedule_shadows_base_schedule() {
        let mut collection = ScheduleCollection::new();
        collection
            .register_schedule(single_entry(
                "butler",
                "kitchen",
                Weekday::Tuesday,
                TimeBlock::Morning,
            ))
            .unwrap();

        let override_schedule = Schedule::new(
            character("butler"),
            vec![
                ScheduleEntry::builder(LocationId::new("ballroom").unwrap())
                    .window(
                        DaySet::single(Weekday::Tuesday),
                        TimeRange::single(TimeBlock::Morning),
                    )
                    .build()
                    .unwrap(),
                ScheduleEntry::builder(LocationId::new("garden").unwrap())
                    .window(
                        DaySet::single(Weekday::Wednesday),
                        TimeRange::single(TimeBlock::Morning),
                    )
                    .build()
                    .unwrap(),
            ],
        );
        collection
            .register(character("butler"), override_schedule)
            .unwrap();

        assert_eq!(
            location_of(&collection, "butler", Weekday::Tuesday, TimeBlock::Morning),
            Some("ballroom".to_string())
        );
        assert_eq!(
            location_of(&collection, "butler", Weekday::Wednesday, TimeBlock::Morning),
            Some("garden".to_string())
        );
        assert_eq!(
            location_of(&collection, "butler", Weekday::Thursday, TimeBlock::Morning),
            None
        );
    }

    #[test]
    fn first_resolve_seals_the_collection() {
        let mut collection = ScheduleCollection::new();
        assert_eq!(collection.phase(), CollectionPhase::Loading);

        collection
            .register_schedule(single_entry("cook", "kitchen", Weekday::Monday, TimeBlock::Morning))
            .unwrap();
        let _ = location_of(&collection, "cook", Weekday::Monday, TimeBlock::Morning);
        assert_eq!(collection.phase(), CollectionPhase::Sealed);

        let err = collection
            .register_schedule(single_entry("cook", "cellar", Weekday::Monday, TimeBlock::Night))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition(_)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn explicit_seal_rejects_registration() {
        let mut collection = ScheduleCollection::new();
        collection.seal();
        assert!(collection.is_sealed());
        assert!(collection
            .register_schedule(single_entry("cook", "kitchen", Weekday::Monday, TimeBlock::Morning))
            .is_err());
    }

    #[test]
    fn register_rejects_mismatched_owner() {
        let mut collection = ScheduleCollection::new();
        let err = collection
            .register(
                character("maid"),
                single_entry("cook", "kitchen", Weekday::Monday, TimeBlock::Morning),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(collection.is_empty());
    }

    #[test]
    fn counts_and_listing() {
        let mut collection = ScheduleCollection::new();
        collection
            .register_schedule(single_entry("maid", "parlor", Weekday::Monday, TimeBlock::Morning))
            .unwrap();
        collection
            .register_schedule(single_entry("cook", "kitchen", Weekday::Monday, TimeBlock::Morning))
            .unwrap();
        collection
            .register_schedule(single_entry("cook", "market", Weekday::Friday, TimeBlock::Morning))
            .unwrap();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.character_count(), 2);
        let names: Vec<&str> = collection.characters().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["cook", "maid"]);
        assert_eq!(collection.schedules_for(&character("cook")).len(), 2);
        assert!(collection.schedules_for(&character("nobody")).is_empty());
    }
}
