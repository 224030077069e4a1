//! Console Rendering
//!
//! Turns view state into text for the terminal. Renderers return strings
//! and never print, so the binary decides where output goes.

mod accounts;
mod chart;
mod dashboard;

pub use accounts::{render_account_detail, render_accounts, ACCOUNTS_LOADING, NO_ACCOUNTS};
pub use chart::render_growth_chart;
pub use dashboard::{render_dashboard, CHART_LOADING, NO_CHART_DATA};

use thiserror::Error;

/// Output format for list-style views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for reading in a terminal
    #[default]
    Table,
    /// Pretty-printed JSON of the view state
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Errors from producing machine-readable output
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8,
}

/// Pad or cut `text` to exactly `width` characters
pub(crate) fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("Zo\u{eb}", 3), "Zo\u{eb}");
    }
}
