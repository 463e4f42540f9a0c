use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use crate::models::Event;
use crate::multiday::expand_multiday;

/// Events gathered from one or more calendar sources.
#[derive(Debug, Clone, Default)]
pub struct EventCollection {
    events: Vec<Event>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn add_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    /// Replaces every multi-day event with its per-day pieces.
    ///
    /// Already-split pieces are single-day, so calling this after each
    /// source is added is safe.
    pub fn expand_multiday(&mut self) {
        let events = std::mem::take(&mut self.events);
        self.events = expand_multiday(events);
    }

    /// Events whose start lies in `[start, end)`.
    pub fn filter_by_date_range<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| *start <= e.start && e.start < *end)
            .collect()
    }

    /// Events in `[start, end)` grouped by the date of their start as seen
    /// in `offset`, each day sorted chronologically.
    pub fn group_by_day(
        &self,
        start: &DateTime<FixedOffset>,
        end: &DateTime<FixedOffset>,
        offset: FixedOffset,
    ) -> BTreeMap<NaiveDate, Vec<&Event>> {
        let mut days: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
        for event in self.filter_by_date_range(start, end) {
            let day = event.start.with_timezone(&offset).date_naive();
            days.entry(day).or_default().push(event);
        }
        for events in days.values_mut() {
            events.sort_by_key(|e| e.start);
        }
        days
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn event(summary: &str, start: DateTime<FixedOffset>, hours: i64) -> Event {
        Event {
            summary: summary.to_string(),
            start,
            end: start + Duration::hours(hours),
            location: String::new(),
            description: String::new(),
            rrule: None,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<FixedOffset> {
        utc().with_ymd_and_hms(2025, 1, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_add_and_count() {
        let mut collection = EventCollection::new();
        assert!(collection.is_empty());
        collection.add_event(event("a", at(15, 9), 1));
        collection.add_events(vec![event("b", at(16, 9), 1), event("c", at(17, 9), 1)]);
        assert_eq!(collection.count(), 3);
        collection.clear();
        assert_eq!(collection.count(), 0);
    }

    #[test]
    fn test_expand_multiday_replaces_events() {
        let mut collection = EventCollection::new();
        collection.add_event(event("trip", at(15, 9), 56));
        collection.add_event(event("lunch", at(15, 12), 1));
        collection.expand_multiday();
        let summaries: Vec<&str> = collection.events().iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["trip", "trip", "lunch"]);

        collection.expand_multiday();
        assert_eq!(collection.count(), 3);
    }

    #[test]
    fn test_filter_by_date_range_is_half_open() {
        let mut collection = EventCollection::new();
        collection.add_events(vec![
            event("before", at(12, 23), 1),
            event("first", at(13, 0), 1),
            event("inside", at(15, 9), 1),
            event("boundary", at(20, 0), 1),
        ]);
        let found = collection.filter_by_date_range(&at(13, 0), &at(20, 0));
        let summaries: Vec<&str> = found.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["first", "inside"]);
    }

    #[test]
    fn test_filter_accepts_other_timezones() {
        let mut collection = EventCollection::new();
        collection.add_event(event("a", at(15, 9), 1));
        let start = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(collection.filter_by_date_range(&start, &(start + Duration::days(1))).len(), 1);
    }

    #[test]
    fn test_group_by_day_sorts_within_day() {
        let mut collection = EventCollection::new();
        collection.add_events(vec![
            event("late", at(15, 18), 1),
            event("early", at(15, 8), 1),
            event("next", at(16, 10), 1),
        ]);
        let days = collection.group_by_day(&at(13, 0), &at(20, 0), utc());
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let summaries: Vec<&str> = days[&day].iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["early", "late"]);
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn test_group_by_day_uses_view_offset() {
        let mut collection = EventCollection::new();
        collection.add_event(event("evening", at(15, 22), 1));
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let days = collection.group_by_day(&at(13, 0), &at(20, 0), plus_three);
        assert!(days.contains_key(&NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()));
    }
}
