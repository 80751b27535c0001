//! Clock and ISO-8601 formatting shared by stored JSON, reports and history lines.
//!
//! Timestamps are kept at millisecond precision so a value survives a JSON
//! round trip unchanged and prints the same everywhere.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serializer;

/// Current time, truncated to whole milliseconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `2024-01-01T00:00:00.000Z`
pub fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&iso(*ts))
}

pub(crate) fn serialize_opt<S: Serializer>(
    ts: &Option<DateTime<Utc>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize(ts, s),
        None => s.serialize_none(),
    }
}

/// `true` when `s` has nothing but whitespace or byte-order marks.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}
