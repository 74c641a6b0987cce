use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Window;

/// Number of time blocks in one simulated day.
pub const BLOCKS_PER_DAY: u8 = 4;

/// Number of days in one simulated week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Hour at which a simulated day begins. Earlier hours belong to the
/// previous day's night.
pub const DAY_START_HOUR: u8 = 5;

// =============================================================================
// Weekday
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn display_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Zero-based position in the week, Monday first.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is not in `0..7`.
    pub fn from_index(index: u8) -> Result<Self, DomainError> {
        Self::all()
            .get(index as usize)
            .copied()
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Day index {} is out of range (0..{})",
                    index, DAYS_PER_WEEK
                ))
            })
    }

    /// Returns the following day, wrapping Sunday to Monday.
    pub fn next(&self) -> Weekday {
        match self {
            Weekday::Monday => Weekday::Tuesday,
            Weekday::Tuesday => Weekday::Wednesday,
            Weekday::Wednesday => Weekday::Thursday,
            Weekday::Thursday => Weekday::Friday,
            Weekday::Friday => Weekday::Saturday,
            Weekday::Saturday => Weekday::Sunday,
            Weekday::Sunday => Weekday::Monday,
        }
    }

    /// Returns all days in order.
    pub fn all() -> [Weekday; 7] {
        [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Weekday {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            "sunday" | "sun" => Ok(Weekday::Sunday),
            other => Err(DomainError::parse(format!("Unknown weekday: {}", other))),
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

// =============================================================================
// Time Block
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBlock {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeBlock {
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeBlock::Morning => "Morning",
            TimeBlock::Afternoon => "Afternoon",
            TimeBlock::Evening => "Evening",
            TimeBlock::Night => "Night",
        }
    }

    /// Zero-based position within the day.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is not in `0..4`.
    pub fn from_index(index: u8) -> Result<Self, DomainError> {
        Self::all()
            .get(index as usize)
            .copied()
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Time block index {} is out of range (0..{})",
                    index, BLOCKS_PER_DAY
                ))
            })
    }

    /// Returns the starting hour for this block.
    pub fn start_hour(&self) -> u8 {
        match self {
            TimeBlock::Morning => DAY_START_HOUR,
            TimeBlock::Afternoon => 12,
            TimeBlock::Evening => 18,
            TimeBlock::Night => 22,
        }
    }

    /// Maps an hour of the wall clock onto its block.
    pub fn from_hour(hour: u8) -> TimeBlock {
        match hour {
            5..=11 => TimeBlock::Morning,
            12..=17 => TimeBlock::Afternoon,
            18..=21 => TimeBlock::Evening,
            _ => TimeBlock::Night,
        }
    }

    /// Returns all blocks in order.
    pub fn all() -> [TimeBlock; 4] {
        [
            TimeBlock::Morning,
            TimeBlock::Afternoon,
            TimeBlock::Evening,
            TimeBlock::Night,
        ]
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for TimeBlock {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeBlock::Morning),
            "afternoon" => Ok(TimeBlock::Afternoon),
            "evening" => Ok(TimeBlock::Evening),
            "night" => Ok(TimeBlock::Night),
            other => Err(DomainError::parse(format!("Unknown time block: {}", other))),
        }
    }
}

// =============================================================================
// Time of Day
// =============================================================================

/// A point in the simulated week.
///
/// Ordered by day first, then block, so `Monday/Night < Tuesday/Morning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    day: Weekday,
    block: TimeBlock,
}

impl TimeOfDay {
    pub fn new(day: Weekday, block: TimeBlock) -> Self {
        Self { day, block }
    }

    /// Builds a point from raw indices (day `0..7`, block `0..4`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either index is out of range.
    pub fn from_indices(day: u8, block: u8) -> Result<Self, DomainError> {
        Ok(Self {
            day: Weekday::from_index(day)?,
            block: TimeBlock::from_index(block)?,
        })
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn block(&self) -> TimeBlock {
        self.block
    }

    /// True if this point falls inside `window`: the day is one of the
    /// window's days and the block lies in its half-open range.
    pub fn contains(&self, window: &Window) -> bool {
        window.days().contains(self.day) && window.range().contains(self.block)
    }

    /// Returns the following block, rolling into the next day after Night.
    pub fn next(&self) -> TimeOfDay {
        match self.block {
            TimeBlock::Night => TimeOfDay::new(self.day.next(), TimeBlock::Morning),
            TimeBlock::Morning => TimeOfDay::new(self.day, TimeBlock::Afternoon),
            TimeBlock::Afternoon => TimeOfDay::new(self.day, TimeBlock::Evening),
            TimeBlock::Evening => TimeOfDay::new(self.day, TimeBlock::Night),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.block)
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    /// Accepts `"tuesday/morning"` or `"tuesday morning"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, block) = s
            .trim()
            .split_once(|c: char| c == '/' || c.is_whitespace())
            .ok_or_else(|| DomainError::parse(format!("Expected '<day>/<block>', got: {}", s)))?;
        Ok(Self::new(day.parse()?, block.parse()?))
    }
}

// =============================================================================
// Game Time
// =============================================================================

/// The simulation clock.
///
/// Wall-clock style time that advances in minutes, hours or days and maps
/// onto a [`TimeOfDay`] for schedule queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTime {
    current: DateTime<Utc>,
}

// Domain layer should not call Utc::now(). Callers pass the starting instant.

impl GameTime {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> DateTime<Utc> {
        self.current
    }

    pub fn advance(&mut self, duration: Duration) {
        self.current += duration;
    }

    pub fn advance_minutes(&mut self, minutes: u32) {
        self.advance(Duration::minutes(minutes as i64));
    }

    pub fn advance_hours(&mut self, hours: u32) {
        self.advance(Duration::hours(hours as i64));
    }

    pub fn advance_days(&mut self, days: u32) {
        self.advance(Duration::days(days as i64));
    }

    /// Get the current hour (0-23).
    pub fn hour(&self) -> u8 {
        self.current.hour() as u8
    }

    pub fn time_block(&self) -> TimeBlock {
        TimeBlock::from_hour(self.hour())
    }

    /// The point in the simulated week for schedule lookups.
    ///
    /// Hours before [`DAY_START_HOUR`] count as the previous day's night.
    pub fn time_of_day(&self) -> TimeOfDay {
        let shifted = self.current - Duration::hours(DAY_START_HOUR as i64);
        TimeOfDay::new(shifted.weekday().into(), self.time_block())
    }

    pub fn display_time(&self) -> String {
        let hour = self.current.hour();
        let minute = self.current.minute();

        let period = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = if hour == 0 {
            12
        } else if hour > 12 {
            hour - 12
        } else {
            hour
        };

        format!("{}:{:02} {}", display_hour, minute, period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{DaySet, TimeRange};

    fn at(rfc3339: &str) -> GameTime {
        GameTime::new(DateTime::parse_from_rfc3339(rfc3339).unwrap().into())
    }

    #[test]
    fn time_block_mapping_is_standardized() {
        // 2024-01-01 is a Monday.
        assert_eq!(at("2024-01-01T05:00:00Z").time_block(), TimeBlock::Morning);
        assert_eq!(at("2024-01-01T12:00:00Z").time_block(), TimeBlock::Afternoon);
        assert_eq!(at("2024-01-01T18:00:00Z").time_block(), TimeBlock::Evening);
        assert_eq!(at("2024-01-01T03:00:00Z").time_block(), TimeBlock::Night);
    }

    #[test]
    fn small_hours_belong_to_previous_day() {
        let early_tuesday = at("2024-01-02T03:00:00Z");
        assert_eq!(
            early_tuesday.time_of_day(),
            TimeOfDay::new(Weekday::Monday, TimeBlock::Night)
        );

        let late_tuesday = at("2024-01-02T23:00:00Z");
        assert_eq!(
            late_tuesday.time_of_day(),
            TimeOfDay::new(Weekday::Tuesday, TimeBlock::Night)
        );
    }

    #[test]
    fn advancing_crosses_days() {
        let mut gt = at("2024-01-07T20:00:00Z");
        assert_eq!(
            gt.time_of_day(),
            TimeOfDay::new(Weekday::Sunday, TimeBlock::Evening)
        );
        gt.advance_hours(10);
        assert_eq!(
            gt.time_of_day(),
            TimeOfDay::new(Weekday::Monday, TimeBlock::Morning)
        );
        assert_eq!(gt.display_time(), "6:00 AM");
    }

    #[test]
    fn from_indices_validates_range() {
        let t = TimeOfDay::from_indices(1, 0).unwrap();
        assert_eq!(t, TimeOfDay::new(Weekday::Tuesday, TimeBlock::Morning));

        assert!(matches!(
            TimeOfDay::from_indices(7, 0),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            TimeOfDay::from_indices(0, 4),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn ordering_is_day_then_block() {
        let monday_night = TimeOfDay::new(Weekday::Monday, TimeBlock::Night);
        let tuesday_morning = TimeOfDay::new(Weekday::Tuesday, TimeBlock::Morning);
        assert!(monday_night < tuesday_morning);
        assert_eq!(monday_night.next(), tuesday_morning);

        let mut all: Vec<TimeOfDay> = vec![
            tuesday_morning,
            monday_night,
            TimeOfDay::new(Weekday::Monday, TimeBlock::Morning),
        ];
        all.sort();
        assert_eq!(all[0].block(), TimeBlock::Morning);
        assert_eq!(all[2], tuesday_morning);
    }

    #[test]
    fn next_wraps_the_week() {
        let sunday_night = TimeOfDay::new(Weekday::Sunday, TimeBlock::Night);
        assert_eq!(
            sunday_night.next(),
            TimeOfDay::new(Weekday::Monday, TimeBlock::Morning)
        );
    }

    #[test]
    fn contains_uses_half_open_range() {
        let window = Window::new(
            DaySet::single(Weekday::Tuesday),
            TimeRange::new(TimeBlock::Morning, Some(TimeBlock::Evening)).unwrap(),
        );

        let inside = TimeOfDay::new(Weekday::Tuesday, TimeBlock::Afternoon);
        let at_end = TimeOfDay::new(Weekday::Tuesday, TimeBlock::Evening);
        let other_day = TimeOfDay::new(Weekday::Wednesday, TimeBlock::Morning);

        assert!(TimeOfDay::new(Weekday::Tuesday, TimeBlock::Morning).contains(&window));
        assert!(inside.contains(&window));
        assert!(!at_end.contains(&window));
        assert!(!other_day.contains(&window));
    }

    #[test]
    fn parses_day_and_block() {
        let t: TimeOfDay = "Tuesday/Morning".parse().unwrap();
        assert_eq!(t, TimeOfDay::new(Weekday::Tuesday, TimeBlock::Morning));

        let t: TimeOfDay = "sat night".parse().unwrap();
        assert_eq!(t, TimeOfDay::new(Weekday::Saturday, TimeBlock::Night));

        assert!("funday/morning".parse::<TimeOfDay>().is_err());
        assert!("tuesday".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn weekday_serializes_snake_case() {
        let json = serde_json::to_string(&Weekday::Wednesday).unwrap();
        assert_eq!(json, "\"wednesday\"");
        let block: TimeBlock = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(block, TimeBlock::Night);
    }
}
