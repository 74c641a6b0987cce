//! Time window value objects
//!
//! A [`Window`] pairs a set of weekdays with a half-open range of time
//! blocks. Schedule entries are active during one or more windows.
//!
//! Key types:
//! - `DaySet` - Non-empty set of weekdays ("any", "weekdays", a single day...)
//! - `TimeRange` - `[start, end)` over block indices, `end` may be end-of-day
//! - `Window` - A `(DaySet, TimeRange)` pair with its own specificity score

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::game_time::{TimeBlock, Weekday, BLOCKS_PER_DAY};

/// Score awarded to a window that names exactly one day.
pub const SINGLE_DAY_SCORE: u8 = 2;

/// Score awarded to a window whose range spans at most one block.
pub const NARROW_RANGE_SCORE: u8 = 2;

const ALL_DAYS_MASK: u8 = 0b0111_1111;

// ============================================================================
// DaySet
// ============================================================================

/// A non-empty set of weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `days` is empty.
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Result<Self, DomainError> {
        let mask = days
            .into_iter()
            .fold(0u8, |mask, day| mask | (1 << day.index()));
        if mask == 0 {
            return Err(DomainError::validation("Day set cannot be empty"));
        }
        Ok(Self(mask))
    }

    pub fn single(day: Weekday) -> Self {
        Self(1 << day.index())
    }

    pub fn any() -> Self {
        Self(ALL_DAYS_MASK)
    }

    pub fn weekdays() -> Self {
        Self(0b0001_1111)
    }

    pub fn weekend() -> Self {
        Self(0b0110_0000)
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Always false: empty sets cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_single_day(&self) -> bool {
        self.len() == 1
    }

    pub fn is_every_day(&self) -> bool {
        self.0 == ALL_DAYS_MASK
    }

    /// The member days, Monday first.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::all().into_iter().filter(|day| self.contains(*day))
    }

    /// Maps every day to the day after it (Sunday becomes Monday).
    pub fn shifted_forward(&self) -> DaySet {
        let rotated = ((self.0 << 1) | (self.0 >> (Weekday::all().len() - 1))) & ALL_DAYS_MASK;
        DaySet(rotated)
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_every_day() {
            return write!(f, "any day");
        }
        let names: Vec<&str> = self.days().map(|d| d.display_name()).collect();
        write!(f, "{}", names.join("+"))
    }
}

impl FromStr for DaySet {
    type Err = DomainError;

    /// Accepts `any`, `everyday`, `daily`, `weekdays`, `weekend` or a day name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "everyday" | "daily" => Ok(DaySet::any()),
            "weekdays" => Ok(DaySet::weekdays()),
            "weekend" | "weekends" => Ok(DaySet::weekend()),
            other => other.parse::<Weekday>().map(DaySet::single),
        }
    }
}

// ============================================================================
// TimeRange
// ============================================================================

/// A half-open range of time blocks within one day.
///
/// `end == BLOCKS_PER_DAY` means the range runs to the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: u8,
    end: u8,
}

impl TimeRange {
    /// Range from `start` up to (not including) `end`, or to the end of the
    /// day when `end` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `end` does not come after `start`.
    pub fn new(start: TimeBlock, end: Option<TimeBlock>) -> Result<Self, DomainError> {
        let end_index = end.map(|b| b.index()).unwrap_or(BLOCKS_PER_DAY);
        if end_index <= start.index() {
            return Err(DomainError::validation(format!(
                "Time range must end after it starts ({} .. {})",
                start,
                end.map(|b| b.display_name()).unwrap_or("end of day")
            )));
        }
        Ok(Self {
            start: start.index(),
            end: end_index,
        })
    }

    pub fn single(block: TimeBlock) -> Self {
        Self {
            start: block.index(),
            end: block.index() + 1,
        }
    }

    pub fn whole_day() -> Self {
        Self {
            start: 0,
            end: BLOCKS_PER_DAY,
        }
    }

    /// Range from the first block of the day up to `end`.
    pub fn until(end: TimeBlock) -> Result<Self, DomainError> {
        Self::new(TimeBlock::Morning, Some(end))
    }

    pub fn start_index(&self) -> u8 {
        self.start
    }

    pub fn end_index(&self) -> u8 {
        self.end
    }

    /// Number of blocks covered.
    pub fn span(&self) -> u8 {
        self.end - self.start
    }

    pub fn contains(&self, block: TimeBlock) -> bool {
        (self.start..self.end).contains(&block.index())
    }

    pub fn is_whole_day(&self) -> bool {
        self.start == 0 && self.end == BLOCKS_PER_DAY
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |index: u8| {
            TimeBlock::from_index(index)
                .map(|b| b.display_name())
                .unwrap_or("end of day")
        };
        write!(f, "{}..{}", name(self.start), name(self.end))
    }
}

// ============================================================================
// Window
// ============================================================================

/// One `(days, range)` pair a schedule entry is active during.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    days: DaySet,
    range: TimeRange,
}

impl Window {
    pub fn new(days: DaySet, range: TimeRange) -> Self {
        Self { days, range }
    }

    /// A day-crossing window, declared explicitly as two windows: `days`
    /// from `start` to the end of the day, then the following days from the
    /// first block up to (not including) `end`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `end` is the first block of the
    /// day, which would leave the second half empty.
    pub fn overnight(
        days: DaySet,
        start: TimeBlock,
        end: TimeBlock,
    ) -> Result<[Window; 2], DomainError> {
        let evening = TimeRange::new(start, None)?;
        let morning = TimeRange::until(end)?;
        Ok([
            Window::new(days, evening),
            Window::new(days.shifted_forward(), morning),
        ])
    }

    pub fn days(&self) -> DaySet {
        self.days
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// How narrowly this window is declared.
    ///
    /// One named day scores [`SINGLE_DAY_SCORE`], a range of at most one
    /// block scores [`NARROW_RANGE_SCORE`].
    pub fn specificity(&self) -> u8 {
        let mut score = 0;
        if self.days.is_single_day() {
            score += SINGLE_DAY_SCORE;
        }
        if self.range.span() <= 1 {
            score += NARROW_RANGE_SCORE;
        }
        score
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.days, self.range)
    }
}
