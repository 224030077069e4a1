//! Dashboard rendering

use std::fmt::Write as _;

use super::{fit, render_growth_chart, OutputFormat, RenderError};
use crate::views::{DashboardView, ViewState};

/// Shown while the account list is being fetched
pub const CHART_LOADING: &str = "Loading chart data...";

/// Shown when the backend has no accounts
pub const NO_CHART_DATA: &str = "No data to display.";

const CARD_WIDTH: usize = 18;

/// Render the dashboard in the requested format
pub fn render_dashboard(view: &DashboardView, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_text(view)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Csv => render_csv(view),
    }
}

fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Admin Dashboard");
    let _ = writeln!(out);

    let cards = match view.summary {
        Some(summary) => [
            ("Total Accounts", summary.total.to_string()),
            ("Active", summary.active.to_string()),
            ("Inactive", summary.inactive.to_string()),
        ],
        None => {
            let pending = if view.growth == ViewState::Loading {
                "..."
            } else {
                "-"
            };
            [
                ("Total Accounts", pending.to_string()),
                ("Active", pending.to_string()),
                ("Inactive", pending.to_string()),
            ]
        }
    };

    let border = format!(
        "+{}+",
        vec!["-".repeat(CARD_WIDTH + 2); cards.len()].join("+")
    );
    let _ = writeln!(out, "{}", border);
    let titles: Vec<String> = cards.iter().map(|(t, _)| fit(t, CARD_WIDTH)).collect();
    let _ = writeln!(out, "| {} |", titles.join(" | "));
    let values: Vec<String> = cards.iter().map(|(_, v)| fit(v, CARD_WIDTH)).collect();
    let _ = writeln!(out, "| {} |", values.join(" | "));
    let _ = writeln!(out, "{}", border);
    let _ = writeln!(out);

    let _ = writeln!(out, "User Growth");
    match &view.growth {
        ViewState::Loading => {
            let _ = writeln!(out, "{}", CHART_LOADING);
        }
        ViewState::Failed(message) => {
            let _ = writeln!(out, "Error: {}", message);
        }
        ViewState::Empty => {
            let _ = writeln!(out, "{}", NO_CHART_DATA);
        }
        ViewState::Ready(chart) => {
            out.push_str(&render_growth_chart(chart));
        }
    }

    out
}

fn render_csv(view: &DashboardView) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["month", "label", "total"])?;

    if let ViewState::Ready(chart) = &view.growth {
        for point in &chart.points {
            writer.write_record([
                point.month.to_string(),
                point.label.clone(),
                point.value.to_string(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes).map_err(|_| RenderError::Utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::{growth_chart, AccountSummary, MonthKey, SeriesPoint};

    fn ready_view() -> DashboardView {
        DashboardView {
            summary: Some(AccountSummary {
                total: 5,
                active: 3,
                inactive: 2,
            }),
            growth: ViewState::Ready(growth_chart(
                vec![
                    SeriesPoint {
                        month: "2024-01".parse::<MonthKey>().unwrap(),
                        label: "Jan 2024".to_string(),
                        value: 4,
                    },
                    SeriesPoint {
                        month: "2024-02".parse::<MonthKey>().unwrap(),
                        label: "Feb 2024".to_string(),
                        value: 5,
                    },
                ],
                5,
            )),
        }
    }

    #[test]
    fn test_text_cards_and_chart() {
        let text = render_dashboard(&ready_view(), OutputFormat::Table).unwrap();
        assert!(text.starts_with("Admin Dashboard\n"));
        assert!(text.contains("| Total Accounts     | Active             | Inactive           |"));
        assert!(text.contains("| 5                  | 3                  | 2                  |"));
        assert!(text.contains("Account Growth Over Time"));
        assert!(text.contains("Feb 2024 │"));
    }

    #[test]
    fn test_text_states() {
        let loading = render_dashboard(&DashboardView::loading(), OutputFormat::Table).unwrap();
        assert!(loading.contains(CHART_LOADING));
        assert!(loading.contains("| ...                |"));

        let empty = DashboardView {
            summary: Some(AccountSummary::default()),
            growth: ViewState::Empty,
        };
        let text = render_dashboard(&empty, OutputFormat::Table).unwrap();
        assert!(text.contains(NO_CHART_DATA));
        assert!(text.contains("| 0                  |"));

        let failed = DashboardView {
            summary: None,
            growth: ViewState::Failed("Failed to fetch user data.".to_string()),
        };
        let text = render_dashboard(&failed, OutputFormat::Table).unwrap();
        assert!(text.contains("Error: Failed to fetch user data."));
        assert!(!text.contains(NO_CHART_DATA));
    }

    #[test]
    fn test_csv_series() {
        let csv = render_dashboard(&ready_view(), OutputFormat::Csv).unwrap();
        assert_eq!(csv, "month,label,total\n2024-01,Jan 2024,4\n2024-02,Feb 2024,5\n");
    }

    #[test]
    fn test_json_shape() {
        let json = render_dashboard(&ready_view(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["inactive"], 2);
        assert_eq!(value["growth"]["state"], "ready");
        assert_eq!(value["growth"]["data"]["points"][1]["month"], "2024-02");
    }
}
