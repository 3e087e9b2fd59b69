//! ISO-8601 timestamps kept as transported and parsed on access.

use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp as the API sent it.
///
/// The raw string is preserved so that re-sending an entity never alters
/// it. Parsing happens lazily: [`Timestamp::parse`] reports failure,
/// [`Timestamp::or_now`] substitutes the current time instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Current time, millisecond precision with a `Z` suffix.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// `days` from now; negative values lie in the past.
    pub fn in_days(days: i64) -> Self {
        Self::from_datetime(Utc::now() + Duration::days(days))
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as RFC 3339 (with or without fractional seconds).
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.0.trim())
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    /// Parsed value, or the current time when the string is malformed.
    pub fn or_now(&self) -> DateTime<Utc> {
        self.parse().unwrap_or_else(Utc::now)
    }

    pub fn is_valid(&self) -> bool {
        self.parse().is_some()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from_datetime(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
