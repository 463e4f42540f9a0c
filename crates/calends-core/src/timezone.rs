use crate::error::CoreError;
use chrono::FixedOffset;

/// Parse a target timezone string into a fixed offset.
///
/// Accepted forms:
/// - `UTC` or `GMT` (any case) for a zero offset
/// - `LOCAL` (any case), meaning "no target", returned as `Ok(None)`
/// - `+HH:MM`, `-HH:MM`, `+HHMM` or `-HHMM`
///
/// Anything else is rejected with [`CoreError::InvalidTimezone`].
pub fn parse_target_timezone(timezone: &str) -> Result<Option<FixedOffset>, CoreError> {
    let normalized = timezone.trim().to_uppercase();
    match normalized.as_str() {
        "UTC" | "GMT" => return Ok(FixedOffset::east_opt(0)),
        "LOCAL" => return Ok(None),
        _ => {}
    }

    parse_offset(&normalized)
        .map(Some)
        .ok_or_else(|| CoreError::InvalidTimezone(timezone.to_string()))
}

/// Lenient variant of [`parse_target_timezone`]: an unrecognized string is
/// logged and treated as "no target".
pub fn parse_target_timezone_lenient(timezone: &str) -> Option<FixedOffset> {
    match parse_target_timezone(timezone) {
        Ok(offset) => offset,
        Err(e) => {
            tracing::warn!("{}, using local interpretation", e);
            None
        }
    }
}

/// Format an offset for display (e.g. "+05:30").
pub fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Delegates to chrono's offset parser once the exact `[+-]HH[:]MM` shape is
/// confirmed, since chrono also takes a space separator and ignores trailing
/// input. Offsets of 24 hours or more are out of chrono's range.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let body = s.get(1..)?;
    let well_formed = match body.as_bytes() {
        [h1, h2, b':', m1, m2] | [h1, h2, m1, m2] => {
            [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    };
    if !well_formed {
        return None;
    }
    s.parse::<FixedOffset>().ok()
}
