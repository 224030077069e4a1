//! Calendar month keys
//!
//! A [`MonthKey`] identifies one calendar month. Its canonical text form is
//! `YYYY-MM` and keys order by calendar time.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar year-month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a key, rejecting months outside `1..=12`
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// Truncate a timestamp to its month (UTC)
    pub fn of(timestamp: DateTime<Utc>) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-based
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month immediately after this one
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month
    ///
    /// Returns `None` only for years chrono cannot represent.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthKeyError::Malformed(s.to_string()))?;

        if year.len() != 4 || month.len() != 2 {
            return Err(MonthKeyError::Malformed(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| MonthKeyError::Malformed(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthKeyError::Malformed(s.to_string()))?;

        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors from building or parsing a [`MonthKey`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthKeyError {
    #[error("Month out of range: {0}")]
    MonthOutOfRange(u32),

    #[error("Invalid month key {0:?}, expected YYYY-MM")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_of_truncates_to_month() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let key = MonthKey::of(ts);
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 1);
        assert_eq!(key.to_string(), "2024-01");
    }

    #[test]
    fn test_succ_rolls_over_year() {
        let dec = MonthKey::new(2023, 12).unwrap();
        assert_eq!(dec.succ(), MonthKey::new(2024, 1).unwrap());
        assert_eq!(MonthKey::new(2024, 2).unwrap().succ().to_string(), "2024-03");
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        let a = MonthKey::new(2023, 12).unwrap();
        let b = MonthKey::new(2024, 1).unwrap();
        let c = MonthKey::new(2024, 11).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_parse() {
        let key: MonthKey = "2024-06".parse().unwrap();
        assert_eq!(key, MonthKey::new(2024, 6).unwrap());

        assert_eq!(
            "2024-13".parse::<MonthKey>(),
            Err(MonthKeyError::MonthOutOfRange(13))
        );
        assert!(matches!(
            "2024-6".parse::<MonthKey>(),
            Err(MonthKeyError::Malformed(_))
        ));
        assert!(matches!(
            "june".parse::<MonthKey>(),
            Err(MonthKeyError::Malformed(_))
        ));
    }

    #[test]
    fn test_serde_uses_canonical_form() {
        let key = MonthKey::new(2024, 3).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03\"");

        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_first_day() {
        let key = MonthKey::new(2024, 2).unwrap();
        assert_eq!(key.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1));
    }
}
