use crate::cache::Cache;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("calends/", env!("CARGO_PKG_VERSION"));
const CALENDAR_MARKER: &str = "BEGIN:VCALENDAR";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error {0}")]
    Status(StatusCode),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("not an iCalendar document (missing BEGIN:VCALENDAR)")]
    NotICalendar,
}

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Reads calendar content from local files or HTTP(S) URLs.
///
/// URL responses go through the [`Cache`]; local files are always read fresh.
pub struct Fetcher {
    client: Client,
    cache: Cache,
}

impl Fetcher {
    pub fn new(cache: Cache) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, cache })
    }

    pub async fn fetch(&mut self, source: &str) -> Result<String, FetchError> {
        if is_url(source) {
            self.fetch_url(source).await
        } else {
            let content = tokio::fs::read_to_string(source).await?;
            ensure_calendar(&content)?;
            Ok(content)
        }
    }

    async fn fetch_url(&mut self, url: &str) -> Result<String, FetchError> {
        if let Some(content) = self.cache.get(url) {
            tracing::debug!("Cache hit for {}", url);
            return Ok(content);
        }

        tracing::debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let content = response.text().await?;
        ensure_calendar(&content)?;
        self.cache.set(url, &content);
        Ok(content)
    }
}

fn ensure_calendar(content: &str) -> Result<(), FetchError> {
    if content.contains(CALENDAR_MARKER) {
        Ok(())
    } else {
        Err(FetchError::NotICalendar)
    }
}
