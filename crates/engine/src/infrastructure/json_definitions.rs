//! JSON schedule definitions.
//!
//! Parses definition documents of the form
//!
//! ```json
//! { "schedules": [ { "character": "mayor_rex",
//!     "entries": [ { "location": "town_hall", "label": "work",
//!       "windows": [ { "days": "weekdays", "from": "morning", "until": "evening" } ] } ] } ] }
//! ```
//!
//! into domain schedules. Serde types here are wire types only; every value
//! is validated through the domain constructors and failures are reported
//! with a path to the offending rule.

use serde::Deserialize;
use whereabouts_domain::{
    CharacterId, Condition, DaySet, DomainError, LocationId, Schedule, ScheduleEntry, TimeBlock,
    TimeRange, Weekday, Window,
};

use super::ports::{DefinitionParser, DefinitionSource, ParseError};

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionDocument {
    schedules: Vec<ScheduleDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleDefinition {
    character: String,
    #[serde(default)]
    entries: Vec<EntryDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryDefinition {
    location: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    windows: Vec<WindowDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowDefinition {
    #[serde(default)]
    days: Option<DaysDefinition>,
    #[serde(default)]
    block: Option<TimeBlock>,
    #[serde(default)]
    from: Option<TimeBlock>,
    #[serde(default)]
    until: Option<TimeBlock>,
    #[serde(default)]
    overnight: bool,
}

/// `"weekdays"` or `["monday", "friday"]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DaysDefinition {
    Keyword(String),
    List(Vec<String>),
}

// =============================================================================
// Parser
// =============================================================================

/// [`DefinitionParser`] for JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDefinitionParser;

impl JsonDefinitionParser {
    pub fn new() -> Self {
        Self
    }
}

impl DefinitionParser for JsonDefinitionParser {
    fn parse(&self, source: &DefinitionSource) -> Result<Vec<Schedule>, ParseError> {
        let document: DefinitionDocument =
            serde_json::from_str(&source.contents).map_err(|e| {
                ParseError::new(&source.name, &e)
                    .at(format!("line {} column {}", e.line(), e.column()))
            })?;

        document
            .schedules
            .into_iter()
            .enumerate()
            .map(|(index, definition)| {
                convert_schedule(definition, &format!("schedules[{}]", index))
                    .map_err(|(location, e)| ParseError::from_domain(&source.name, location, &e))
            })
            .collect()
    }
}

/// Conversion failure: path of the rule plus the domain error.
type ConvertError = (String, DomainError);

fn convert_schedule(definition: ScheduleDefinition, path: &str) -> Result<Schedule, ConvertError> {
    let character_id =
        CharacterId::new(definition.character).map_err(|e| (format!("{}.character", path), e))?;

    let entries = definition
        .entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| convert_entry(entry, &format!("{}.entries[{}]", path, index)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Schedule::new(character_id, entries))
}

fn convert_entry(definition: EntryDefinition, path: &str) -> Result<ScheduleEntry, ConvertError> {
    let location_id =
        LocationId::new(definition.location).map_err(|e| (format!("{}.location", path), e))?;

    let mut windows = Vec::with_capacity(definition.windows.len());
    for (index, window) in definition.windows.iter().enumerate() {
        let window_path = format!("{}.windows[{}]", path, index);
        windows.extend(convert_window(window).map_err(|e| (window_path, e))?);
    }

    let mut builder = ScheduleEntry::builder(location_id).windows(windows);
    if let Some(condition) = definition.condition {
        let condition =
            Condition::new(condition).map_err(|e| (format!("{}.condition", path), e))?;
        builder = builder.condition(condition);
    }
    if let Some(label) = definition.label {
        builder = builder.label(label);
    }
    builder.build().map_err(|e| (path.to_string(), e))
}

fn convert_window(definition: &WindowDefinition) -> Result<Vec<Window>, DomainError> {
    let days = match &definition.days {
        None => DaySet::any(),
        Some(DaysDefinition::Keyword(keyword)) => keyword.parse::<DaySet>()?,
        Some(DaysDefinition::List(names)) => DaySet::new(
            names
                .iter()
                .map(|name| name.parse::<Weekday>())
                .collect::<Result<Vec<_>, _>>()?,
        )?,
    };

    if definition.overnight {
        if definition.block.is_some() {
            return Err(DomainError::validation(
                "An overnight window takes 'from' and 'until', not 'block'",
            ));
        }
        let end = definition.until.ok_or_else(|| {
            DomainError::validation("An overnight window needs an 'until' block")
        })?;
        let start = definition.from.unwrap_or(TimeBlock::Night);
        return Ok(Window::overnight(days, start, end)?.to_vec());
    }

    let range = match (definition.block, definition.from, definition.until) {
        (Some(block), None, None) => TimeRange::single(block),
        (Some(_), _, _) => {
            return Err(DomainError::validation(
                "A window takes either 'block' or 'from'/'until', not both",
            ))
        }
        (None, from, until) => TimeRange::new(from.unwrap_or(TimeBlock::Morning), until)?,
    };
    Ok(vec![Window::new(days, range)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use whereabouts_domain::TimeOfDay;

    fn parse(json: &str) -> Result<Vec<Schedule>, ParseError> {
        JsonDefinitionParser::new().parse(&DefinitionSource::new("test.json", json))
    }

    #[test]
    fn parses_full_document() {
        let schedules = parse(
            r#"{ "schedules": [
                { "character": "mayor_rex", "entries": [
                    { "location": "town_hall", "label": "work",
                      "windows": [ { "days": "weekdays", "from": "morning", "until": "evening" } ] },
                    { "location": "chapel", "condition": "devout",
                      "windows": [ { "days": ["sunday"], "block": "morning" } ] }
                ] },
                { "character": "elena", "entries": [
                    { "location": "forge", "windows": [ {} ] }
                ] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(schedules.len(), 2);
        let rex = &schedules[0];
        assert_eq!(rex.character_id().as_str(), "mayor_rex");
        assert_eq!(rex.len(), 2);

        let work = &rex.entries()[0];
        assert_eq!(work.label(), Some("work"));
        assert_eq!(work.windows()[0].days(), DaySet::weekdays());
        assert_eq!(work.windows()[0].range().span(), 2);
        assert_eq!(work.specificity(), 0);

        let chapel = &rex.entries()[1];
        assert_eq!(chapel.condition().map(|c| c.as_str()), Some("devout"));
        assert_eq!(chapel.specificity(), 4);

        let forge = &schedules[1].entries()[0];
        assert!(forge.windows()[0].range().is_whole_day());
        assert!(forge.windows()[0].days().is_every_day());
    }

    #[test]
    fn overnight_window_expands() {
        let schedules = parse(
            r#"{ "schedules": [ { "character": "old_tom", "entries": [
                { "location": "tavern",
                  "windows": [ { "days": "friday", "from": "evening", "until": "afternoon", "overnight": true } ] }
            ] } ] }"#,
        )
        .unwrap();

        let tavern = &schedules[0].entries()[0];
        assert_eq!(tavern.windows().len(), 2);
        assert!(tavern.matches(&TimeOfDay::new(Weekday::Saturday, TimeBlock::Morning), None));
        assert!(tavern.matches(&TimeOfDay::new(Weekday::Friday, TimeBlock::Night), None));
    }

    #[test]
    fn malformed_json_reports_line() {
        let err = parse("{ \"schedules\": [ ").unwrap_err();
        assert_eq!(err.source_name, "test.json");
        assert!(err.location.unwrap_or_default().starts_with("line 1"));
    }

    #[test]
    fn unknown_weekday_reports_window_path() {
        let err = parse(
            r#"{ "schedules": [ { "character": "sam", "entries": [
                { "location": "docks", "windows": [ { "block": "morning" } ] },
                { "location": "beach", "windows": [ { "days": ["funday"] } ] }
            ] } ] }"#,
        )
        .unwrap_err();

        assert_eq!(
            err.location.as_deref(),
            Some("schedules[0].entries[1].windows[0]")
        );
        assert!(err.message.contains("funday"));
    }

    #[test]
    fn entry_without_windows_is_rejected() {
        let err = parse(
            r#"{ "schedules": [ { "character": "sam", "entries": [
                { "location": "docks", "windows": [] }
            ] } ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.location.as_deref(), Some("schedules[0].entries[0]"));
    }

    #[test]
    fn empty_location_is_rejected() {
        let err = parse(
            r#"{ "schedules": [ { "character": "sam", "entries": [
                { "location": " ", "windows": [ {} ] }
            ] } ] }"#,
        )
        .unwrap_err();
        assert_eq!(
            err.location.as_deref(),
            Some("schedules[0].entries[0].location")
        );
    }

    #[test]
    fn block_and_range_together_are_rejected() {
        let err = parse(
            r#"{ "schedules": [ { "character": "sam", "entries": [
                { "location": "docks", "windows": [ { "block": "night", "from": "evening" } ] }
            ] } ] }"#,
        )
        .unwrap_err();
        assert!(err.message.contains("not both"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = parse(
            r#"{ "schedules": [ { "character": "sam", "entries": [
                { "location": "docks", "windows": [ { "from": "evening", "until": "morning" } ] }
            ] } ] }"#,
        )
        .unwrap_err();
        assert!(err.message.contains("end after it starts"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse(r#"{ "schedules": [], "priority": 3 }"#).unwrap_err();
        assert!(err.message.contains("priority"));
    }
}
