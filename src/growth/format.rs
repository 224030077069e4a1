//! Chart-ready presentation of the growth series
//!
//! Turns a timeline and its running totals into labelled points. Labels come
//! from a [`LabelFormatter`] so callers choose the locale.

use chrono::Locale;
use serde::Serialize;
use thiserror::Error;

use super::{AccountRecord, MonthKey, Timeline};

/// Chart title shown above the growth series
pub const CHART_TITLE: &str = "Account Growth Over Time";

/// Name of the plotted series
pub const DATASET_LABEL: &str = "Total Accounts";

/// Totals at or below this get a y-axis step of exactly one account
const UNIT_STEP_MAX_TOTAL: u64 = 10;

/// Renders a month as a short human-readable label
pub trait LabelFormatter {
    fn label(&self, month: MonthKey) -> String;
}

impl<F> LabelFormatter for F
where
    F: Fn(MonthKey) -> String,
{
    fn label(&self, month: MonthKey) -> String {
        self(month)
    }
}

/// Abbreviated month name and year in a fixed locale, e.g. `Jan 2024` for `en_US`
#[derive(Debug, Clone, Copy)]
pub struct LocaleLabels {
    locale: Locale,
}

impl LocaleLabels {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Build from a POSIX locale name such as `en_US` or `vi_VN`
    pub fn from_name(name: &str) -> Result<Self, UnknownLocale> {
        Locale::try_from(name)
            .map(Self::new)
            .map_err(|_| UnknownLocale(name.to_string()))
    }
}

impl Default for LocaleLabels {
    fn default() -> Self {
        Self::new(Locale::en_US)
    }
}

impl LabelFormatter for LocaleLabels {
    fn label(&self, month: MonthKey) -> String {
        match month.first_day() {
            Some(day) => day.format_localized("%b %Y", self.locale).to_string(),
            None => month.to_string(),
        }
    }
}

/// Locale name chrono does not know about
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown locale: {0}")]
pub struct UnknownLocale(pub String);

/// One labelled point of the growth chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub month: MonthKey,
    pub label: String,
    pub value: u64,
}

/// Everything needed to draw the account growth chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthChart {
    pub title: String,
    pub dataset_label: String,
    pub points: Vec<SeriesPoint>,
    /// Fixed y-axis step, or `None` to let the renderer choose
    pub y_step: Option<u64>,
}

impl GrowthChart {
    /// Largest plotted value, which is the last one since totals never decrease
    pub fn max_value(&self) -> u64 {
        self.points.last().map(|p| p.value).unwrap_or(0)
    }
}

/// Pair each month with its label and running total
pub fn format_series<L: LabelFormatter + ?Sized>(
    timeline: &Timeline,
    totals: &[u64],
    labels: &L,
) -> Vec<SeriesPoint> {
    timeline
        .iter()
        .zip(totals)
        .map(|(month, value)| SeriesPoint {
            month: *month,
            label: labels.label(*month),
            value: *value,
        })
        .collect()
}

/// Wrap formatted points with the chart presentation options
pub fn growth_chart(points: Vec<SeriesPoint>, record_count: usize) -> GrowthChart {
    let y_step = if record_count as u64 > UNIT_STEP_MAX_TOTAL {
        None
    } else {
        Some(1)
    };

    GrowthChart {
        title: CHART_TITLE.to_string(),
        dataset_label: DATASET_LABEL.to_string(),
        points,
        y_step,
    }
}

/// Headline counts for the dashboard cards
///
/// Computed straight from the record list, independent of the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}

impl AccountSummary {
    pub fn from_records<R: AccountRecord>(records: &[R]) -> Self {
        let total = records.len() as u64;
        let active = records.iter().filter(|r| r.is_active()).count() as u64;
        Self {
            total,
            active,
            inactive: total - active,
        }
    }
}
