use anyhow::{Context, Result};
use calends_core::error::CoreError;
use calends_core::models::DEFAULT_MAX_RECURRING_INSTANCES;
use figment::{
    providers::{Env, Format, Json, Toml},
    Figment,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Config files looked up in the working directory, in priority order.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["calendars.json", "calends.json", "calends.toml"];

pub const DEFAULT_CACHE_EXPIRATION: i64 = 60;
pub const DEFAULT_CACHE_PATH: &str = ".calends-cache.json";

/// Calendar sources, either as a plain list or keyed by a display alias.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Calendars {
    List(Vec<String>),
    Aliased(BTreeMap<String, String>),
}

impl Default for Calendars {
    fn default() -> Self {
        Calendars::List(Vec::new())
    }
}

impl Calendars {
    pub fn is_empty(&self) -> bool {
        match self {
            Calendars::List(sources) => sources.is_empty(),
            Calendars::Aliased(sources) => sources.is_empty(),
        }
    }

    pub fn sources(&self) -> Vec<CalendarSource> {
        match self {
            Calendars::List(sources) => sources.iter().map(CalendarSource::new).collect(),
            Calendars::Aliased(sources) => sources
                .iter()
                .map(|(alias, location)| CalendarSource::aliased(location, alias))
                .collect(),
        }
    }
}

/// A file path or URL to load, plus the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSource {
    pub location: String,
    pub alias: Option<String>,
}

impl CalendarSource {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            alias: None,
        }
    }

    pub fn aliased(location: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            alias: Some(alias.into()),
        }
    }
}

impl fmt::Display for CalendarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias.as_deref().unwrap_or(&self.location))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub calendars: Calendars,
    pub timezone: Option<String>,
    /// Seconds a fetched URL stays cached.
    pub cache_expiration: i64,
    pub max_recurring_instances: i64,
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendars: Calendars::default(),
            timezone: None,
            cache_expiration: DEFAULT_CACHE_EXPIRATION,
            max_recurring_instances: DEFAULT_MAX_RECURRING_INSTANCES as i64,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

impl Config {
    /// Loads configuration from `path` (if any) layered under `CALENDS_`
    /// environment variables. A config file must name at least one calendar.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Config = Self::figment(path)
            .extract()
            .with_context(|| match path {
                Some(path) => format!("Failed to load config file {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })?;

        if path.is_some() && config.calendars.is_empty() {
            return Err(CoreError::InvalidInput("'calendars' cannot be empty".to_string()).into());
        }
        config.validate()?;
        Ok(config)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = if path.extension().is_some_and(|ext| ext == "toml") {
                figment.merge(Toml::file(path))
            } else {
                figment.merge(Json::file(path))
            };
        }
        figment.merge(Env::prefixed("CALENDS_").ignore(&["log"]))
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.cache_expiration < 0 {
            return Err(CoreError::InvalidInput(format!(
                "'cache_expiration' must be non-negative, got {}",
                self.cache_expiration
            )));
        }
        if self.max_recurring_instances < 1 {
            return Err(CoreError::InvalidInput(format!(
                "'max_recurring_instances' must be positive, got {}",
                self.max_recurring_instances
            )));
        }
        Ok(())
    }

    pub fn sources(&self) -> Vec<CalendarSource> {
        self.calendars.sources()
    }

    pub fn cache_expiration_secs(&self) -> u64 {
        u64::try_from(self.cache_expiration).unwrap_or(0)
    }

    pub fn max_instances(&self) -> usize {
        usize::try_from(self.max_recurring_instances).unwrap_or(DEFAULT_MAX_RECURRING_INSTANCES)
    }
}

/// Resolves which config file to read.
///
/// An explicit path must exist. Without one, the first of
/// [`DEFAULT_CONFIG_FILES`] present in `dir` is used, but only when no
/// sources were given on the command line.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    dir: &Path,
    has_cli_sources: bool,
) -> Result<Option<PathBuf>, CoreError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(CoreError::InvalidInput(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }
    if has_cli_sources {
        return Ok(None);
    }
    Ok(DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file()))
}
