//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Consumes the timestamp, returning the inner DateTime.
    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Adds calendar years, clamping to the last representable instant.
    ///
    /// Feb 29 rolls back to Feb 28 in non-leap target years.
    pub fn add_years(&self, years: u32) -> Self {
        let shifted = self
            .0
            .checked_add_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self(shifted)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn add_years_keeps_month_day_and_time() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap());
        let later = ts.add_years(100);

        assert_eq!(later.as_datetime().year(), 2124);
        assert_eq!(later.as_datetime().month(), 3);
        assert_eq!(later.as_datetime().day(), 15);
        assert_eq!(later.as_datetime().time(), ts.as_datetime().time());
    }

    #[test]
    fn add_years_clamps_leap_day() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        let later = ts.add_years(1);
        assert_eq!(later.as_datetime().month(), 2);
        assert_eq!(later.as_datetime().day(), 28);
    }

    #[test]
    fn add_years_saturates_at_max() {
        let ts = Timestamp::from_datetime(DateTime::<Utc>::MAX_UTC);
        assert_eq!(ts.add_years(100).into_datetime(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn timestamp_ordering_works() {
        let a = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let b = a.add_years(1);
        assert!(a.is_before(&b));
        assert!(a < b);
    }
}
