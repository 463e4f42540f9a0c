//! iCalendar content parsing: line unfolding and VEVENT block extraction.

pub mod event;

pub use event::{parse_rrule, EventParser, ParsedEvent};

use crate::datetime::Normalizer;
use crate::models::Event;
use crate::recurrence::RecurrenceExpander;

const BEGIN_VEVENT: &str = "BEGIN:VEVENT";
const END_VEVENT: &str = "END:VEVENT";

/// Unfolds iCalendar content into logical lines.
///
/// CRLF, CR and LF are all accepted as line endings. A line starting with a
/// space or tab continues the previous logical line; exactly one leading
/// whitespace character is removed. Empty lines are dropped.
pub fn unfold(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut unfolded: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in normalized.split('\n') {
        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            current.push_str(continuation);
        } else {
            if !current.is_empty() {
                unfolded.push(std::mem::take(&mut current));
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        unfolded.push(current);
    }
    unfolded
}

/// Parses whole iCalendar documents into a flat list of events.
///
/// Recurring events are expanded in place of their base event; events
/// without a usable DTSTART are dropped. Multi-day splitting is left to the
/// caller (see [`crate::multiday::expand_multiday`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct IcalParser {
    event_parser: EventParser,
    expander: RecurrenceExpander,
}

impl IcalParser {
    pub fn new(normalizer: Normalizer, max_instances: usize) -> Self {
        Self {
            event_parser: EventParser::new(normalizer),
            expander: RecurrenceExpander::new(normalizer, max_instances),
        }
    }

    /// Parses `content` and returns every event instance it describes.
    ///
    /// Lines outside VEVENT blocks are ignored. A block left open at the end
    /// of input is discarded, and a BEGIN:VEVENT inside an open block
    /// restarts it.
    pub fn parse(&self, content: &str) -> Vec<Event> {
        let mut events = Vec::new();
        let mut block: Option<Vec<String>> = None;

        for line in unfold(content) {
            if line == BEGIN_VEVENT {
                block = Some(Vec::new());
            } else if line == END_VEVENT {
                if let Some(lines) = block.take() {
                    self.push_block(&mut events, &lines);
                }
            } else if let Some(lines) = block.as_mut() {
                lines.push(line);
            }
        }

        if let Some(lines) = block {
            tracing::debug!("Discarding unclosed VEVENT block ({} lines)", lines.len());
        }
        events
    }

    fn push_block(&self, events: &mut Vec<Event>, lines: &[String]) {
        let parsed = self.event_parser.parse_event(lines);
        let summary = parsed.summary.clone();
        let Some(event) = parsed.into_event() else {
            tracing::debug!("Dropping event '{}' without a start", summary);
            return;
        };
        match event.rrule.as_ref() {
            Some(rule) => events.extend(self.expander.expand(&event, Some(rule))),
            None => events.push(event),
        }
    }
}
