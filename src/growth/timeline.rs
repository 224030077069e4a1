//! Month timeline generation

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountRecord, MonthKey};

/// Contiguous, strictly increasing run of months
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    months: Vec<MonthKey>,
}

impl Timeline {
    /// Every month from `start` to `end`, both inclusive
    ///
    /// Empty when `end` is before `start`.
    pub fn between(start: MonthKey, end: MonthKey) -> Self {
        let mut months = Vec::new();
        let mut cursor = start;
        while cursor <= end {
            months.push(cursor);
            cursor = cursor.succ();
        }
        Self { months }
    }

    /// Timeline from the earliest record's month up to the month of `now`
    ///
    /// Returns `None` for an empty record set; callers report "no data"
    /// instead of charting. If a record is dated after `now` the timeline is
    /// stretched to cover it, so every record lands on the timeline.
    pub fn for_records<R: AccountRecord>(records: &[R], now: DateTime<Utc>) -> Option<Self> {
        let first = records.iter().map(|r| r.created_at()).min()?;
        let last = records.iter().map(|r| r.created_at()).max()?;

        let end = MonthKey::of(now).max(MonthKey::of(last));
        Some(Self::between(MonthKey::of(first), end))
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn first(&self) -> Option<MonthKey> {
        self.months.first().copied()
    }

    pub fn last(&self) -> Option<MonthKey> {
        self.months.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthKey> {
        self.months.iter()
    }
}
