use chrono::{DateTime, Duration, FixedOffset};

use crate::datetime::Normalizer;
use crate::models::{Event, RecurrenceRule, DEFAULT_EVENT_DURATION_HOURS, DEFAULT_SUMMARY};

/// Best-effort result of parsing one VEVENT; `start` may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEvent {
    pub summary: String,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub location: String,
    pub description: String,
    pub rrule: Option<RecurrenceRule>,
}

impl Default for ParsedEvent {
    fn default() -> Self {
        Self {
            summary: DEFAULT_SUMMARY.to_string(),
            start: None,
            end: None,
            location: String::new(),
            description: String::new(),
            rrule: None,
        }
    }
}

impl ParsedEvent {
    /// Converts to an [`Event`], or `None` when there is no start.
    pub fn into_event(self) -> Option<Event> {
        let start = self.start?;
        let end = self
            .end
            .unwrap_or_else(|| start + Duration::hours(DEFAULT_EVENT_DURATION_HOURS));
        Some(Event {
            summary: self.summary,
            start,
            end,
            location: self.location,
            description: self.description,
            rrule: self.rrule,
        })
    }
}

/// Parses an `RRULE:` line into its key/value parts.
///
/// Returns `None` if the line is not an RRULE property. Parts without `=`
/// are skipped; values are kept verbatim.
pub fn parse_rrule(line: &str) -> Option<RecurrenceRule> {
    let body = line.strip_prefix("RRULE:")?;
    Some(
        body.split(';')
            .filter_map(|part| part.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

/// Turns the property lines of a single VEVENT into a [`ParsedEvent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EventParser {
    normalizer: Normalizer,
}

impl EventParser {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Scans `lines` for the properties we understand; everything else is
    /// ignored. DTSTART/DTEND are resolved through the normalizer, so naive
    /// values come back stamped with the target offset. A missing DTEND
    /// defaults to one hour after DTSTART.
    pub fn parse_event<S: AsRef<str>>(&self, lines: &[S]) -> ParsedEvent {
        let mut event = ParsedEvent::default();
        for line in lines {
            let line = line.as_ref();
            if let Some(summary) = line.strip_prefix("SUMMARY:") {
                event.summary = summary.to_string();
            } else if line.starts_with("DTSTART") {
                event.start = self.normalizer.parse(line);
            } else if line.starts_with("DTEND") {
                event.end = self.normalizer.parse(line);
            } else if let Some(location) = line.strip_prefix("LOCATION:") {
                event.location = location.to_string();
            } else if let Some(description) = line.strip_prefix("DESCRIPTION:") {
                event.description = description.to_string();
            } else if line.starts_with("RRULE:") {
                event.rrule = parse_rrule(line);
            }
        }

        if let (Some(start), None) = (event.start, event.end) {
            event.end = Some(start + Duration::hours(DEFAULT_EVENT_DURATION_HOURS));
        }
        event
    }
}
