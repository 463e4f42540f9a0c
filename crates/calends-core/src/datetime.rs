//! Parsing of iCalendar DATE and DATE-TIME values.
//!
//! Values come in three shapes: UTC (`20250115T140000Z`), floating
//! (`20250115T140000`) and date-only (`20250115`). Floating and date-only
//! values carry no offset; they are *reinterpreted* in the target offset
//! (the wall-clock reading is kept), while UTC values are *converted* to it
//! (the absolute instant is kept).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const FLOATING_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";

/// A parsed iCalendar date or date-time, before offset resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcalDateTime {
    Utc(DateTime<Utc>),
    Floating(NaiveDateTime),
    Date(NaiveDate),
}

impl IcalDateTime {
    /// Returns whether the value carries no offset information.
    pub fn is_naive(&self) -> bool {
        !matches!(self, IcalDateTime::Utc(_))
    }

    /// Wall-clock reading of the value (UTC values read in UTC).
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            IcalDateTime::Utc(dt) => dt.naive_utc(),
            IcalDateTime::Floating(dt) => *dt,
            IcalDateTime::Date(d) => d.and_time(chrono::NaiveTime::MIN),
        }
    }

    /// Resolves the value to an offset-carrying instant.
    ///
    /// With a target, UTC values are converted to it and naive values are
    /// stamped with it. Without a target, everything lands on UTC.
    pub fn resolve(&self, target: Option<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        let offset = target.unwrap_or_else(utc_offset);
        match self {
            IcalDateTime::Utc(dt) => Some(dt.with_timezone(&offset)),
            _ => offset.from_local_datetime(&self.naive()).single(),
        }
    }
}

/// Parses a raw property value into an [`IcalDateTime`].
///
/// The input may still hold the property name and parameters
/// (`DTSTART;TZID=Europe/Paris:20250115T140000`); everything up to and
/// including the last colon is ignored. Returns `None` for empty or
/// unrecognized input.
pub fn parse_datetime(raw: &str) -> Option<IcalDateTime> {
    let token = raw.rsplit(':').next().unwrap_or_default().trim();
    if token.is_empty() || !token.is_ascii() {
        return None;
    }

    match token.len() {
        16 => NaiveDateTime::parse_from_str(token, UTC_FORMAT)
            .ok()
            .map(|dt| IcalDateTime::Utc(dt.and_utc())),
        15 => NaiveDateTime::parse_from_str(token, FLOATING_FORMAT)
            .ok()
            .map(IcalDateTime::Floating),
        8 => NaiveDate::parse_from_str(token, DATE_FORMAT)
            .ok()
            .map(IcalDateTime::Date),
        _ => None,
    }
}

/// Parses datetimes and resolves them against a configured target offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    target: Option<FixedOffset>,
}

impl Normalizer {
    pub fn new(target: Option<FixedOffset>) -> Self {
        Self { target }
    }

    /// Offset that naive values and generated boundaries fall back to.
    pub fn effective_offset(&self) -> FixedOffset {
        self.target.unwrap_or_else(utc_offset)
    }

    /// Parses `raw` and resolves it in one step.
    pub fn parse(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        parse_datetime(raw).and_then(|value| value.resolve(self.target))
    }
}

#[inline]
pub(crate) fn utc_offset() -> FixedOffset {
    Utc.fix()
}
