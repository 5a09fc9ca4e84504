//! UTC timestamps for entity creation and modification times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a value read back from storage.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Wire format for every `*_at` field in HTTP responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_lies_between_surrounding_clock_reads() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(*ts.as_datetime() >= before);
        assert!(*ts.as_datetime() <= after);
    }

    #[test]
    fn later_timestamps_sort_after_earlier_ones() {
        let earlier = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        let later = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 1).unwrap());

        assert!(earlier < later);
        assert_eq!(earlier.max(later), later);
    }

    #[test]
    fn renders_rfc3339_in_utc() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());

        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn serializes_as_bare_string() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();

        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-01-15T10:30:00Z\"");
    }
}
