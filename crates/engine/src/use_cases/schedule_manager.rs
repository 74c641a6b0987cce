//! Schedule manager - Two-phase loading and resolution.
//!
//! The manager owns the schedule collection for a running game. It is
//! driven in two phases:
//!
//! 1. Loading: [`ScheduleManager::load_all`] parses every definition source
//!    and registers what it declares. Malformed sources are reported and
//!    skipped.
//! 2. Querying: [`ScheduleManager::get_entry`] and friends answer "where is
//!    this character now". The first query (or
//!    [`ScheduleManager::finish_loading`]) closes the loading phase.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use whereabouts_domain::{
    CharacterId, CollectionPhase, ConditionEvaluator, LocationId, Resolution, ScheduleCollection,
    ScheduleEntry, TimeOfDay,
};

use crate::infrastructure::ports::{
    DefinitionParser, DefinitionSource, EngineError, ParseError,
};

/// Shared condition capability.
pub type SharedEvaluator = Arc<dyn ConditionEvaluator + Send + Sync>;

/// Loads schedules once, then resolves character whereabouts.
pub struct ScheduleManager {
    parser: Box<dyn DefinitionParser>,
    evaluator: Option<SharedEvaluator>,
    collection: ScheduleCollection,
}

impl fmt::Debug for ScheduleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleManager")
            .field("phase", &self.collection.phase())
            .field("schedules", &self.collection.len())
            .field("has_evaluator", &self.evaluator.is_some())
            .finish()
    }
}

impl ScheduleManager {
    /// Empty manager with no condition evaluator: conditioned entries never
    /// match until one is installed.
    pub fn new(parser: impl DefinitionParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
            evaluator: None,
            collection: ScheduleCollection::new(),
        }
    }

    pub fn with_evaluator(mut self, evaluator: impl ConditionEvaluator + Send + Sync + 'static) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    pub fn set_evaluator(&mut self, evaluator: SharedEvaluator) {
        self.evaluator = Some(evaluator);
    }

    pub fn clear_evaluator(&mut self) {
        self.evaluator = None;
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Parse and register every source, in order.
    ///
    /// A source that fails to parse contributes none of its schedules and is
    /// reported in the returned list; the remaining sources still load.
    ///
    /// # Errors
    ///
    /// `EngineError::LoadingClosed` once the manager has been sealed.
    pub fn load_all<'s>(
        &mut self,
        sources: impl IntoIterator<Item = &'s DefinitionSource>,
    ) -> Result<Vec<ParseError>, EngineError> {
        if self.collection.is_sealed() {
            return Err(EngineError::LoadingClosed);
        }

        let mut failures = Vec::new();
        let mut loaded = 0usize;
        let mut source_count = 0usize;

        for source in sources {
            source_count += 1;
            let schedules = match self.parser.parse(source) {
                Ok(schedules) => schedules,
                Err(e) => {
                    tracing::warn!(source = %source.name, error = %e, "Failed to parse schedule source");
                    failures.push(e);
                    continue;
                }
            };

            for schedule in schedules {
                let character_id = schedule.character_id().clone();
                let entries = schedule.len();
                match self.collection.register_schedule(schedule) {
                    Ok(()) => {
                        loaded += 1;
                        tracing::debug!(
                            source = %source.name,
                            character_id = %character_id,
                            entries,
                            "Registered schedule"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            source = %source.name,
                            character_id = %character_id,
                            error = %e,
                            "Failed to register schedule"
                        );
                        failures.push(ParseError::new(&source.name, &e));
                    }
                }
            }
        }

        tracing::info!(
            sources = source_count,
            schedules = loaded,
            characters = self.collection.character_count(),
            failed = failures.len(),
            "Loaded schedules"
        );

        Ok(failures)
    }

    /// Close the loading phase without answering a query.
    pub fn finish_loading(&self) {
        self.collection.seal();
    }

    pub fn is_loading(&self) -> bool {
        self.collection.phase() == CollectionPhase::Loading
    }

    pub fn phase(&self) -> CollectionPhase {
        self.collection.phase()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The entry that decides where `character_id` is at `time`.
    pub fn get_entry(&self, character_id: &CharacterId, time: &TimeOfDay) -> Option<&ScheduleEntry> {
        self.locate(character_id, time).map(|resolution| resolution.entry)
    }

    /// Like [`Self::get_entry`], with the source and declaration position of
    /// the winning entry.
    pub fn locate(&self, character_id: &CharacterId, time: &TimeOfDay) -> Option<Resolution<'_>> {
        let resolution = self.collection.resolve(character_id, time, self.evaluator());
        match &resolution {
            Some(r) => tracing::debug!(
                character_id = %character_id,
                time = %time,
                location_id = %r.entry.location_id(),
                source_index = r.source_index,
                specificity = r.specificity,
                "Resolved schedule entry"
            ),
            None => tracing::debug!(
                character_id = %character_id,
                time = %time,
                "No schedule entry applies"
            ),
        }
        resolution
    }

    /// Every character whose resolved entry targets `location_id`, sorted.
    pub fn characters_at(&self, location_id: &LocationId, time: &TimeOfDay) -> Vec<CharacterId> {
        self.collection
            .characters()
            .into_iter()
            .filter(|character_id| {
                self.get_entry(character_id, time)
                    .is_some_and(|entry| entry.location_id() == location_id)
            })
            .cloned()
            .collect()
    }

    /// Resolved location of every character that has one at `time`.
    pub fn snapshot(&self, time: &TimeOfDay) -> BTreeMap<CharacterId, LocationId> {
        self.collection
            .characters()
            .into_iter()
            .filter_map(|character_id| {
                self.get_entry(character_id, time)
                    .map(|entry| (character_id.clone(), entry.location_id().clone()))
            })
            .collect()
    }

    pub fn schedule_count(&self) -> usize {
        self.collection.len()
    }

    pub fn character_count(&self) -> usize {
        self.collection.character_count()
    }

    fn evaluator(&self) -> Option<&dyn ConditionEvaluator> {
        self.evaluator
            .as_deref()
            .map(|evaluator| evaluator as &dyn ConditionEvaluator)
    }
}
