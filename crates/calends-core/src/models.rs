use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Summary used when a VEVENT carries no SUMMARY property.
pub const DEFAULT_SUMMARY: &str = "Untitled Event";

/// Duration given to events that have a start but no DTEND.
pub const DEFAULT_EVENT_DURATION_HOURS: i64 = 1;

/// Upper bound on generated recurrence instances unless configured otherwise.
pub const DEFAULT_MAX_RECURRING_INSTANCES: usize = 100;

/// A single calendar event with resolved, offset-carrying start and end.
///
/// `rrule` is only ever set on a base event straight out of the parser.
/// Instances produced by the recurrence expander or the multi-day splitter
/// never carry a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub summary: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub location: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrule: Option<RecurrenceRule>,
}

impl Event {
    /// Returns a copy of this event moved to a new time span, without a rule.
    pub fn instance(&self, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            summary: self.summary.clone(),
            start,
            end,
            location: self.location.clone(),
            description: self.description.clone(),
            rrule: None,
        }
    }

    /// Returns whether the event starts and ends on different calendar dates.
    #[inline]
    pub fn spans_multiple_days(&self) -> bool {
        self.start.date_naive() != self.end.date_naive()
    }
}

/// Recurrence frequencies the expander knows how to step through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Error, Debug, PartialEq)]
#[error("Unsupported recurrence frequency: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "DAILY"),
            Frequency::Weekly => write!(f, "WEEKLY"),
            Frequency::Monthly => write!(f, "MONTHLY"),
            Frequency::Yearly => write!(f, "YEARLY"),
        }
    }
}

/// The `KEY=VALUE` parts of an RRULE property, kept verbatim and in order.
///
/// Values are only interpreted through the typed accessors, which never
/// fail: malformed numbers read as absent and unknown frequencies as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceRule {
    parts: Vec<(String, String)>,
}

impl RecurrenceRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing an earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.parts.iter_mut().find(|(k, _)| *k == key) {
            Some(part) => part.1 = value,
            None => self.parts.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// FREQ, if it names a supported frequency.
    pub fn frequency(&self) -> Option<Frequency> {
        self.get("FREQ").and_then(|f| f.parse().ok())
    }

    /// COUNT, if it is a positive integer.
    pub fn count(&self) -> Option<u32> {
        positive(self.get("COUNT"))
    }

    /// INTERVAL, falling back to 1 when absent or not a positive integer.
    pub fn interval(&self) -> u32 {
        positive(self.get("INTERVAL")).unwrap_or(1)
    }

    /// The raw UNTIL value.
    pub fn until(&self) -> Option<&str> {
        self.get("UNTIL")
    }
}

impl FromIterator<(String, String)> for RecurrenceRule {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut rule = RecurrenceRule::new();
        for (k, v) in iter {
            rule.insert(k, v);
        }
        rule
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}

impl Serialize for RecurrenceRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn positive(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}
