//! # finadmin
//!
//! Admin Finance console - a client for the admin backend that shows account
//! statistics, an account growth chart and the account list.
//!
//! ## Modules
//!
//! - [`growth`]: Month bucketing, timeline and cumulative totals for the chart
//! - [`client`]: REST client for the backend (login, user listing)
//! - [`session`]: Token storage injected into the client
//! - [`views`]: Fetch-then-transform view state for each page
//! - [`render`]: Console output for views
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use finadmin::{ApiClient, ClientConfig, DashboardView, LocaleLabels, MemoryTokenStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default(), Arc::new(MemoryTokenStore::new()))?;
//!     client.login("admin@example.com", "secret").await?;
//!
//!     let view = DashboardView::load(&client, chrono::Utc::now(), &LocaleLabels::default()).await;
//!     if let Some(summary) = view.summary {
//!         println!("{} accounts, {} active", summary.total, summary.active);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod growth;
pub mod logging;
pub mod model;
pub mod render;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use client::{ApiClient, ApiError, ClientConfig, LoginOutcome};

pub use growth::{
    build_growth, AccountRecord, AccountSummary, GrowthChart, LabelFormatter, LocaleLabels,
    MonthKey, SeriesPoint, Timeline,
};

pub use model::{User, UserId};

pub use session::{FileTokenStore, MemoryTokenStore, SessionError, TokenStore};

pub use views::{AccountDetail, AccountRow, AccountsView, DashboardView, DateDisplay, ViewState};

pub use render::{OutputFormat, RenderError};

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig, SessionConfig};
