//! Account Growth
//!
//! Pure aggregation behind the dashboard chart. Nothing here does I/O or
//! reads the clock; the caller passes the fetched snapshot and "now".
//!
//! ## Pipeline
//!
//! 1. [`bucket_by_month`] counts new accounts per creation month
//! 2. [`Timeline::for_records`] lays out every month from the first signup to now
//! 3. [`cumulative_totals`] walks the timeline keeping a running total
//! 4. [`format_series`] attaches a display label to each month

mod bucket;
mod cumulative;
mod format;
mod month;
mod timeline;

pub use bucket::{bucket_by_month, AccountRecord, BucketMap};
pub use cumulative::cumulative_totals;
pub use format::{
    format_series, growth_chart, AccountSummary, GrowthChart, LabelFormatter, LocaleLabels,
    SeriesPoint, UnknownLocale, CHART_TITLE, DATASET_LABEL,
};
pub use month::{MonthKey, MonthKeyError};
pub use timeline::Timeline;

use chrono::{DateTime, Utc};

/// Run the full growth pipeline over one snapshot of records
///
/// Returns `None` when there are no records, in which case no timeline or
/// totals are computed.
///
/// The series normally ends at the month of `now`. A record created after
/// `now` pushes the end out to that record's month, so the last total always
/// equals `records.len()`.
pub fn build_growth<R, L>(records: &[R], now: DateTime<Utc>, labels: &L) -> Option<GrowthChart>
where
    R: AccountRecord,
    L: LabelFormatter + ?Sized,
{
    let timeline = Timeline::for_records(records, now)?;
    let buckets = bucket_by_month(records);
    let totals = cumulative_totals(&timeline, &buckets);

    tracing::debug!(
        months = timeline.len(),
        buckets = buckets.len(),
        records = records.len(),
        "Computed account growth series"
    );

    Some(growth_chart(
        format_series(&timeline, &totals, labels),
        records.len(),
    ))
}
