//! Schedule entry - One time-conditioned placement rule
//!
//! An entry maps a list of time windows (plus an optional condition) to a
//! location. Its specificity is derived from how narrowly the windows are
//! declared and is never assigned by content authors.

use crate::error::DomainError;
use crate::game_time::{TimeBlock, TimeOfDay};
use crate::ids::LocationId;
use crate::value_objects::{Condition, ConditionEvaluator, DaySet, TimeRange, Window};

/// A single placement rule.
///
/// # Invariants
///
/// - `windows` is never empty
/// - `location_id` is never empty (enforced by `LocationId`)
/// - `specificity` is the maximum window score, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    windows: Vec<Window>,
    location_id: LocationId,
    condition: Option<Condition>,
    specificity: u8,
    label: Option<String>,
}

impl ScheduleEntry {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `windows` is empty.
    pub fn new(
        windows: Vec<Window>,
        location_id: LocationId,
        condition: Option<Condition>,
    ) -> Result<Self, DomainError> {
        let Some(specificity) = windows.iter().map(Window::specificity).max() else {
            return Err(DomainError::validation(format!(
                "Schedule entry for '{}' needs at least one window",
                location_id
            )));
        };
        Ok(Self {
            windows,
            location_id,
            condition,
            specificity,
            label: None,
        })
    }

    /// Start a fluent builder for an entry targeting `location_id`.
    ///
    /// ```
    /// use whereabouts_domain::{DaySet, LocationId, ScheduleEntry, TimeBlock, TimeRange};
    ///
    /// let entry = ScheduleEntry::builder(LocationId::new("bakery").unwrap())
    ///     .window(DaySet::weekdays(), TimeRange::single(TimeBlock::Morning))
    ///     .label("open shop")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(entry.location_id().as_str(), "bakery");
    /// assert_eq!(entry.specificity(), 2);
    /// ```
    pub fn builder(location_id: LocationId) -> ScheduleEntryBuilder {
        ScheduleEntryBuilder {
            location_id,
            windows: Vec::new(),
            condition: None,
            label: None,
            error: None,
        }
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Load-time specificity: the best score over all windows.
    pub fn specificity(&self) -> u8 {
        self.specificity
    }

    /// Query-time specificity: the best score over the windows that
    /// contain `time`, or `None` if no window does.
    pub fn specificity_at(&self, time: &TimeOfDay) -> Option<u8> {
        self.windows
            .iter()
            .filter(|w| time.contains(w))
            .map(Window::specificity)
            .max()
    }

    /// True if some window contains `time` and the condition (if any) holds.
    ///
    /// A conditioned entry never matches without an evaluator.
    pub fn matches(&self, time: &TimeOfDay, evaluator: Option<&dyn ConditionEvaluator>) -> bool {
        self.windows.iter().any(|w| time.contains(w)) && self.condition_holds(evaluator)
    }

    pub(crate) fn condition_holds(&self, evaluator: Option<&dyn ConditionEvaluator>) -> bool {
        match (&self.condition, evaluator) {
            (None, _) => true,
            (Some(condition), Some(evaluator)) => evaluator.evaluate(condition),
            (Some(_), None) => false,
        }
    }
}

/// Fluent builder for [`ScheduleEntry`].
///
/// Window errors are held until [`ScheduleEntryBuilder::build`].
#[derive(Debug)]
pub struct ScheduleEntryBuilder {
    location_id: LocationId,
    windows: Vec<Window>,
    condition: Option<Condition>,
    label: Option<String>,
    error: Option<DomainError>,
}

impl ScheduleEntryBuilder {
    pub fn window(mut self, days: DaySet, range: TimeRange) -> Self {
        self.windows.push(Window::new(days, range));
        self
    }

    pub fn windows(mut self, windows: impl IntoIterator<Item = Window>) -> Self {
        self.windows.extend(windows);
        self
    }

    /// Declare a window that crosses into the following day.
    ///
    /// See [`Window::overnight`] for how it is split.
    pub fn overnight(mut self, days: DaySet, start: TimeBlock, end: TimeBlock) -> Self {
        match Window::overnight(days, start, end) {
            Ok(halves) => self.windows.extend(halves),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a window was malformed or none
    /// was declared.
    pub fn build(self) -> Result<ScheduleEntry, DomainError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut entry = ScheduleEntry::new(self.windows, self.location_id, self.condition)?;
        entry.label = self.label;
        Ok(entry)
    }
}
