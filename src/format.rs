//! Text formatting shared by the TUI and the plain CLI output

use crate::types::{ChartRow, InsightsDiagnostics, InsightsReport};

/// Shown in place of the charts when the filter matches nothing
pub const EMPTY_MESSAGE: &str = "No data for this filter.";

/// Longest category name shown before truncation
const MAX_NAME_WIDTH: usize = 18;

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Format a dollar amount (e.g., 1234.5 -> "$1,234.50")
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.max(0.0) * 100.0).round() as u64;
    format!("${}.{:02}", format_number(cents / 100), cents % 100)
}

/// Format a bar proportional to `value / max`
/// Example: value=50, max=100, width=8 → "████░░░░"
pub fn format_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || width == 0 {
        return "░".repeat(width);
    }
    let filled = ((value / max) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a name to `width` characters (UTF-8 safe)
pub fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() > width && width > 0 {
        format!("{}…", name.chars().take(width - 1).collect::<String>())
    } else {
        name.to_string()
    }
}

/// One-line note about records the aggregator skipped or could not match
pub fn diagnostics_summary(diagnostics: &InsightsDiagnostics) -> Option<String> {
    let mut parts = Vec::new();
    if diagnostics.malformed_dates > 0 {
        parts.push(plural(diagnostics.malformed_dates, "malformed date", "malformed dates"));
    }
    if diagnostics.invalid_prices > 0 {
        parts.push(plural(diagnostics.invalid_prices, "invalid price", "invalid prices"));
    }
    if diagnostics.unmatched_services > 0 {
        parts.push(format!(
            "{} counted as Uncategorized",
            plural(diagnostics.unmatched_services, "unmatched service", "unmatched services")
        ));
    }
    if diagnostics.shadowed_services > 0 {
        parts.push(plural(
            diagnostics.shadowed_services,
            "duplicate service name",
            "duplicate service names",
        ));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn plural(n: u64, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

/// The two charts of the insights view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    Count,
    Revenue,
}

impl ChartMetric {
    pub fn title(self) -> &'static str {
        match self {
            Self::Count => "Service Popularity by Count",
            Self::Revenue => "Service Revenue Distribution",
        }
    }

    pub fn value(self, row: &ChartRow) -> f64 {
        match self {
            Self::Count => row.count as f64,
            Self::Revenue => row.revenue,
        }
    }

    /// Value label; revenue also shows its share of the total
    pub fn label(self, row: &ChartRow, report: &InsightsReport) -> String {
        match self {
            Self::Count => format_number(row.count),
            Self::Revenue => {
                let total = report.total_revenue();
                let share = if total > 0.0 {
                    row.revenue / total * 100.0
                } else {
                    0.0
                };
                format!("{} ({:.0}%)", format_currency(row.revenue), share)
            }
        }
    }

    /// Largest value across the report's rows
    pub fn max(self, report: &InsightsReport) -> f64 {
        report
            .rows
            .iter()
            .map(|row| self.value(row))
            .fold(0.0, f64::max)
    }
}

/// Plain-text chart lines: name, bar, value label
pub fn chart_text(report: &InsightsReport, metric: ChartMetric, bar_width: usize) -> Vec<String> {
    let name_width = name_width(report);
    let max = metric.max(report);
    report
        .rows
        .iter()
        .map(|row| {
            format!(
                "{:<name_width$}  {}  {}",
                truncate_name(&row.name, name_width),
                format_bar(metric.value(row), max, bar_width),
                metric.label(row, report),
            )
        })
        .collect()
}

/// Column width for category names in a chart
pub fn name_width(report: &InsightsReport) -> usize {
    report
        .rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH)
}
