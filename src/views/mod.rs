//! Views
//!
//! Each view follows the same flow: fetch one snapshot from the backend,
//! transform it without further I/O, hand the result to the renderer.
//! Fetch failures are turned into a single message at this boundary.

mod accounts;
mod dashboard;

pub use accounts::{AccountDetail, AccountRow, AccountsView, DateDisplay};
pub use dashboard::DashboardView;

use serde::Serialize;

use crate::client::ApiError;

/// Where a view is in its fetch-transform cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState<T> {
    /// Fetch still in flight
    Loading,
    /// Fetch failed; holds the message to show
    Failed(String),
    /// Fetch succeeded with nothing to show
    Empty,
    /// Data ready to render
    Ready(T),
}

impl<T> ViewState<T> {
    /// Convert a fetch error into the failed state
    pub fn from_error(error: &ApiError) -> Self {
        tracing::warn!("View fetch failed: {}", error);
        ViewState::Failed(error.user_message())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SESSION_EXPIRED_MESSAGE;

    #[test]
    fn test_from_error_keeps_user_message() {
        let state: ViewState<()> = ViewState::from_error(&ApiError::SessionExpired);
        assert_eq!(state, ViewState::Failed(SESSION_EXPIRED_MESSAGE.to_string()));
        assert!(state.is_failed());
        assert!(state.ready().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let ready = ViewState::Ready(3);
        assert_eq!(
            serde_json::to_string(&ready).unwrap(),
            r#"{"state":"ready","data":3}"#
        );

        let empty: ViewState<u8> = ViewState::Empty;
        assert_eq!(serde_json::to_string(&empty).unwrap(), r#"{"state":"empty"}"#);
    }
}
