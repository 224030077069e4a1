//! Dashboard view: summary cards and the account growth chart

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ViewState;
use crate::client::{ApiClient, ApiError};
use crate::growth::{build_growth, AccountSummary, GrowthChart, LabelFormatter};
use crate::model::User;

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// `None` until the snapshot arrives
    pub summary: Option<AccountSummary>,
    pub growth: ViewState<GrowthChart>,
}

impl DashboardView {
    pub fn loading() -> Self {
        Self {
            summary: None,
            growth: ViewState::Loading,
        }
    }

    /// Build the dashboard from one fetched snapshot
    ///
    /// Card counts come from the raw list. The chart is only computed when
    /// there is at least one account.
    pub fn from_snapshot<L>(users: &[User], now: DateTime<Utc>, labels: &L) -> Self
    where
        L: LabelFormatter + ?Sized,
    {
        let summary = AccountSummary::from_records(users);
        let growth = match build_growth(users, now, labels) {
            Some(chart) => ViewState::Ready(chart),
            None => ViewState::Empty,
        };

        Self {
            summary: Some(summary),
            growth,
        }
    }

    /// Build the dashboard from a fetch outcome
    pub fn from_fetch<L>(result: Result<Vec<User>, ApiError>, now: DateTime<Utc>, labels: &L) -> Self
    where
        L: LabelFormatter + ?Sized,
    {
        match result {
            Ok(users) => Self::from_snapshot(&users, now, labels),
            Err(e) => Self {
                summary: None,
                growth: ViewState::from_error(&e),
            },
        }
    }

    /// Fetch the account list and build the dashboard
    pub async fn load<L>(client: &ApiClient, now: DateTime<Utc>, labels: &L) -> Self
    where
        L: LabelFormatter + ?Sized,
    {
        Self::from_fetch(client.list_users().await, now, labels)
    }
}
