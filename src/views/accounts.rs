//! Account listing and account detail views

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;

use super::ViewState;
use crate::client::{ApiClient, ApiError};
use crate::model::User;

const NOT_AVAILABLE: &str = "N/A";

/// How account timestamps are shown
#[derive(Debug, Clone, Copy)]
pub struct DateDisplay {
    offset: FixedOffset,
}

impl DateDisplay {
    /// Display in UTC shifted by `minutes`; out-of-range offsets fall back to UTC
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!("Ignoring out-of-range timezone offset {} minutes", minutes);
                utc_offset()
            });
        Self { offset }
    }

    /// `dd/mm/yyyy HH:MM`, or `N/A` when absent
    pub fn date_time(&self, value: Option<DateTime<Utc>>) -> String {
        match value {
            Some(dt) => dt.with_timezone(&self.offset).format("%d/%m/%Y %H:%M").to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// `dd/mm/yyyy`, or `N/A` when absent
    pub fn date(&self, value: Option<DateTime<Utc>>) -> String {
        match value {
            Some(dt) => dt.with_timezone(&self.offset).format("%d/%m/%Y").to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for DateDisplay {
    fn default() -> Self {
        Self {
            offset: utc_offset(),
        }
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// One line of the account table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl AccountRow {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.full_name(),
            email: user.email.clone(),
            role: user.role_name().to_string(),
            status: if user.is_active { "Active" } else { "Locked" }.to_string(),
        }
    }
}

/// All fields of a single account, ready to print
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDetail {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub role: String,
    pub active: String,
    pub email_verified: String,
    pub created_at: String,
    pub last_login_at: String,
}

impl AccountDetail {
    pub fn from_user(user: &User, dates: &DateDisplay) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.full_name(),
            email: user.email.clone(),
            phone: user
                .phone_number
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            date_of_birth: dates.date(user.date_of_birth),
            role: user.role_name().to_string(),
            active: yes_no(user.is_active).to_string(),
            email_verified: yes_no(user.is_email_verified).to_string(),
            created_at: dates.date_time(Some(user.created_at)),
            last_login_at: dates.date_time(user.last_login_at),
        }
    }
}

/// The account listing page
#[derive(Debug, Clone, PartialEq)]
pub struct AccountsView {
    pub accounts: ViewState<Vec<User>>,
}

impl AccountsView {
    pub fn loading() -> Self {
        Self {
            accounts: ViewState::Loading,
        }
    }

    pub fn from_fetch(result: Result<Vec<User>, ApiError>) -> Self {
        let accounts = match result {
            Ok(users) if users.is_empty() => ViewState::Empty,
            Ok(users) => ViewState::Ready(users),
            Err(e) => ViewState::from_error(&e),
        };
        Self { accounts }
    }

    pub async fn load(client: &ApiClient) -> Self {
        Self::from_fetch(client.list_users().await)
    }

    /// Table rows in backend order
    pub fn rows(&self) -> Vec<AccountRow> {
        self.accounts
            .ready()
            .map(|users| users.iter().map(AccountRow::from_user).collect())
            .unwrap_or_default()
    }

    /// Look up one account by id as typed by the user
    pub fn find(&self, id: &str) -> Option<&User> {
        self.accounts
            .ready()
            .and_then(|users| users.iter().find(|u| u.user_id.matches(id)))
    }

    /// Detail for one account, or the message to show instead
    pub fn detail(&self, id: &str, dates: &DateDisplay) -> ViewState<AccountDetail> {
        match &self.accounts {
            ViewState::Loading => ViewState::Loading,
            ViewState::Failed(message) => ViewState::Failed(message.clone()),
            ViewState::Empty => ViewState::Failed(format!("No account with id {}.", id)),
            ViewState::Ready(_) => match self.find(id) {
                Some(user) => ViewState::Ready(AccountDetail::from_user(user, dates)),
                None => ViewState::Failed(format!("No account with id {}.", id)),
            },
        }
    }
}
