use chrono::{DateTime, Duration, FixedOffset, Months};

use crate::datetime::Normalizer;
use crate::models::{Event, Frequency, RecurrenceRule, DEFAULT_MAX_RECURRING_INSTANCES};

/// RecurrenceExpander: turns a base event plus its RRULE into concrete instances.
///
/// Responsibilities:
/// 1. Read FREQ, COUNT, INTERVAL and UNTIL from the rule with safe fallbacks
/// 2. Step each occurrence from the previous one by calendar-aware increments
/// 3. Bound the output by `max_instances` regardless of what the rule asks for
/// 4. Degrade instead of failing: unsupported rules yield the base event alone,
///    arithmetic overflow truncates the sequence
#[derive(Debug, Clone, Copy)]
pub struct RecurrenceExpander {
    normalizer: Normalizer,
    max_instances: usize,
}

impl Default for RecurrenceExpander {
    fn default() -> Self {
        Self::new(Normalizer::default(), DEFAULT_MAX_RECURRING_INSTANCES)
    }
}

impl RecurrenceExpander {
    /// Creates an expander. A zero bound is raised to one so that expansion
    /// always yields at least the first occurrence.
    pub fn new(normalizer: Normalizer, max_instances: usize) -> Self {
        Self {
            normalizer,
            max_instances: max_instances.max(1),
        }
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    /// Expands `event` according to `rule`.
    ///
    /// # Behavior
    /// - No rule, or a FREQ outside DAILY/WEEKLY/MONTHLY/YEARLY: a single
    ///   clone of `event`
    /// - COUNT (if a positive integer) limits the instances, capped at
    ///   `max_instances`
    /// - INTERVAL (if a positive integer) scales each step, else 1
    /// - UNTIL stops the sequence at the first occurrence after it; the first
    ///   occurrence itself is always emitted
    /// - Every instance keeps the base duration and carries no rule
    pub fn expand(&self, event: &Event, rule: Option<&RecurrenceRule>) -> Vec<Event> {
        let Some(rule) = rule else {
            return vec![event.clone()];
        };
        let Some(frequency) = rule.frequency() else {
            tracing::debug!(
                "Unsupported recurrence rule '{}' on '{}', keeping a single instance",
                rule,
                event.summary
            );
            return vec![event.clone()];
        };

        let count = rule
            .count()
            .map_or(self.max_instances, |c| c as usize)
            .min(self.max_instances);
        let interval = rule.interval();
        let until = rule.until().and_then(|u| self.normalizer.parse(u));
        let duration = event.end - event.start;

        // Growth is driven by the steps actually taken, never by the bound.
        let mut instances = Vec::new();
        let mut current = Some(event.start);
        while instances.len() < count {
            let Some(start) = current else {
                tracing::debug!(
                    "Recurrence of '{}' overflowed after {} instances",
                    event.summary,
                    instances.len()
                );
                break;
            };
            if !instances.is_empty() && until.is_some_and(|until| start > until) {
                break;
            }
            let Some(end) = start.checked_add_signed(duration) else {
                break;
            };
            instances.push(event.instance(start, end));
            current = next_occurrence(start, frequency, interval);
        }

        instances
    }
}

/// Start of the occurrence following `current`.
///
/// Monthly and yearly steps clamp the day of month to the end of the target
/// month (Jan 31 + 1 month = Feb 28/29, Feb 29 + 1 year = Feb 28). The clamped
/// day carries into later steps.
fn next_occurrence(
    current: DateTime<FixedOffset>,
    frequency: Frequency,
    interval: u32,
) -> Option<DateTime<FixedOffset>> {
    match frequency {
        Frequency::Daily => current.checked_add_signed(Duration::try_days(i64::from(interval))?),
        Frequency::Weekly => current.checked_add_signed(Duration::try_weeks(i64::from(interval))?),
        Frequency::Monthly => current.checked_add_months(Months::new(interval)),
        Frequency::Yearly => current.checked_add_months(Months::new(interval.checked_mul(12)?)),
    }
}
