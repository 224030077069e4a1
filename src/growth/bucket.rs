//! Month bucketing
//!
//! Groups account records by the calendar month they were created in.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::MonthKey;

/// Anything the growth pipeline can aggregate
pub trait AccountRecord {
    /// When the account was created
    fn created_at(&self) -> DateTime<Utc>;

    /// Whether the account is currently active
    fn is_active(&self) -> bool;
}

/// New-record count per month. Only months with at least one record have a key.
pub type BucketMap = BTreeMap<MonthKey, u64>;

/// Count records per creation month
pub fn bucket_by_month<R: AccountRecord>(records: &[R]) -> BucketMap {
    let mut buckets = BucketMap::new();
    for record in records {
        *buckets.entry(MonthKey::of(record.created_at())).or_insert(0) += 1;
    }
    buckets
}
