use crate::config::CalendarSource;
use crate::fetcher::{FetchError, Fetcher};
use calends_core::collection::EventCollection;
use calends_core::multiday::expand_multiday;
use calends_core::parser::IcalParser;

/// A source that could not be loaded.
#[derive(Debug)]
pub struct SourceError {
    pub source: CalendarSource,
    pub error: FetchError,
}

/// Fetches, parses and accumulates events from calendar sources.
pub struct CalendarManager {
    parser: IcalParser,
    fetcher: Fetcher,
    events: EventCollection,
}

impl CalendarManager {
    pub fn new(parser: IcalParser, fetcher: Fetcher) -> Self {
        Self {
            parser,
            fetcher,
            events: EventCollection::new(),
        }
    }

    /// Loads one source, returning the number of events it contributed
    /// after recurrence expansion and multi-day splitting.
    pub async fn load_source(&mut self, source: &CalendarSource) -> Result<usize, FetchError> {
        let content = self.fetcher.fetch(&source.location).await?;
        let events = expand_multiday(self.parser.parse(&content));
        let count = events.len();
        self.events.add_events(events);
        tracing::info!("Loaded {} events from {}", count, source);
        Ok(count)
    }

    /// Loads every source in order. A failing source is skipped and
    /// returned; it never stops the remaining ones from loading.
    pub async fn load_sources(&mut self, sources: &[CalendarSource]) -> Vec<SourceError> {
        let mut failures = Vec::new();
        for source in sources {
            if let Err(error) = self.load_source(source).await {
                failures.push(SourceError {
                    source: source.clone(),
                    error,
                });
            }
        }
        failures
    }

    pub fn events(&self) -> &EventCollection {
        &self.events
    }

    pub fn count_events(&self) -> usize {
        self.events.count()
    }
}
