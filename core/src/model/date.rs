//! Wire handling for due dates.
//!
//! Dates travel as `YYYY-MM-DD`. Browsers post an empty string for an unset
//! `<input type="date">`, and document stores tend to hand back full
//! timestamps, so both are accepted on input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer};

pub const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Parses a wire date. Blank input means "no date".
pub fn parse_wire_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, WIRE_FORMAT) {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", raw))
}

/// `null`, `""` and a missing key all deserialize to `None`.
pub mod optional {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse_wire_date(&raw).map_err(de::Error::custom),
        }
    }
}

/// Tri-state for partial updates: missing key stays `None` (via `#[serde(default)]`),
/// `null` or `""` becomes `Some(None)` (clear), a date becomes `Some(Some(date))`.
pub mod patch {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Some(None)),
            Some(raw) => parse_wire_date(&raw).map(Some).map_err(de::Error::custom),
        }
    }
}
