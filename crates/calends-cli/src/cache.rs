use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct CacheEntry {
    /// Unix seconds at which the content was stored.
    timestamp: i64,
    content: String,
}

/// File-backed cache of fetched calendar content with expiration.
///
/// Entries live in a single JSON document. Failing to read or write that
/// file never fails a lookup; the cache just behaves as if it were empty.
#[derive(Debug)]
pub struct Cache {
    path: Option<PathBuf>,
    expiration_secs: i64,
    entries: HashMap<String, CacheEntry>,
}

impl Cache {
    /// Opens the cache stored at `path`, starting empty if it cannot be read.
    pub fn load(path: impl Into<PathBuf>, expiration_secs: u64) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable cache {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read cache {}: {}", path.display(), e);
                HashMap::new()
            }
        };
        Self {
            path: Some(path),
            expiration_secs: i64::try_from(expiration_secs).unwrap_or(i64::MAX),
            entries,
        }
    }

    #[cfg(test)]
    pub fn in_memory(expiration_secs: u64) -> Self {
        Self {
            path: None,
            expiration_secs: i64::try_from(expiration_secs).unwrap_or(i64::MAX),
            entries: HashMap::new(),
        }
    }

    /// Returns the cached content for `key` unless it has expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        self.get_at(key, Utc::now().timestamp())
    }

    pub fn set(&mut self, key: &str, content: &str) {
        self.set_at(key, content, Utc::now().timestamp());
    }

    fn get_at(&mut self, key: &str, now: i64) -> Option<String> {
        let entry = self.entries.get(key)?;
        if now.saturating_sub(entry.timestamp) > self.expiration_secs {
            self.entries.remove(key);
            return None;
        }
        Some(entry.content.clone())
    }

    fn set_at(&mut self, key: &str, content: &str, now: i64) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                timestamp: now,
                content: content.to_string(),
            },
        );
        self.save();
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let result = serde_json::to_string(&self.entries)
            .map_err(std::io::Error::from)
            .and_then(|raw| fs::write(path, raw));
        if let Err(e) = result {
            tracing::warn!("Failed to write cache {}: {}", path.display(), e);
        }
    }
}
