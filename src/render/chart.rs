//! Horizontal bar rendering of the growth series

use std::fmt::Write as _;

use super::fit;
use crate::growth::GrowthChart;

/// Widest bar, in cells
const MAX_BAR_WIDTH: usize = 40;

/// Cells per account when the chart uses unit steps
const UNIT_CELLS: usize = 3;

const BAR: char = '█';

/// Draw the chart as one bar per month, scaled from zero
pub fn render_growth_chart(chart: &GrowthChart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);
    let _ = writeln!(out, "[{}] {}", BAR, chart.dataset_label);
    let _ = writeln!(out);

    let label_width = chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    let max = chart.max_value();
    for point in &chart.points {
        let cells = bar_cells(point.value, max, chart.y_step);
        let _ = writeln!(
            out,
            "{} │{} {}",
            fit(&point.label, label_width),
            BAR.to_string().repeat(cells),
            point.value
        );
    }

    out
}

fn bar_cells(value: u64, max: u64, step: Option<u64>) -> usize {
    if value == 0 || max == 0 {
        return 0;
    }

    match step {
        Some(step) if step > 0 && (max / step) as usize * UNIT_CELLS <= MAX_BAR_WIDTH => {
            (value / step) as usize * UNIT_CELLS
        }
        _ => {
            let scaled = (value as f64 / max as f64 * MAX_BAR_WIDTH as f64).round() as usize;
            scaled.max(1)
        }
    }
}
