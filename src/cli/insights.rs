//! `salontrack insights` and `salontrack categories`

use std::fmt::Write as _;

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::format::{chart_text, diagnostics_summary, ChartMetric, EMPTY_MESSAGE};
use crate::services::{available_categories, InsightsAggregator, RecordStore};
use crate::types::{CategoryFilter, InsightsQuery, InsightsReport, Timeframe};

const BAR_WIDTH: usize = 30;

/// Category insights for a timeframe
#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// Aggregation window
    #[arg(long, value_enum, default_value_t = Timeframe::Monthly)]
    pub timeframe: Timeframe,

    /// `all` or an exact category name
    #[arg(long, default_value = CategoryFilter::ALL)]
    pub category: CategoryFilter,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl InsightsArgs {
    pub fn query(&self) -> InsightsQuery {
        InsightsQuery {
            timeframe: self.timeframe,
            category: self.category.clone(),
        }
    }

    pub fn run(self, store: &RecordStore) -> anyhow::Result<()> {
        let today = self.date.unwrap_or_else(|| Local::now().date_naive());
        let query = self.query();
        let snapshot = store.snapshot();

        let report = InsightsAggregator::aggregate(
            &snapshot.appointments,
            &snapshot.services,
            &query,
            today,
        );
        tracing::debug!(diagnostics = ?report.diagnostics, "insights computed");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_report(&report, &query, today));
        }
        Ok(())
    }
}

/// Plain-text rendition of both charts
pub fn render_report(report: &InsightsReport, query: &InsightsQuery, today: NaiveDate) -> String {
    let period = match query.timeframe {
        Timeframe::Monthly => today.format("%B %Y").to_string(),
        Timeframe::Yearly => today.format("%Y").to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} insights ({}) · {}",
        query.timeframe.label(),
        period,
        query.category.label()
    );
    let _ = writeln!(out);

    if report.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
    } else {
        for metric in [ChartMetric::Count, ChartMetric::Revenue] {
            let _ = writeln!(out, "{}", metric.title());
            for line in chart_text(report, metric, BAR_WIDTH) {
                let _ = writeln!(out, "  {}", line);
            }
            let _ = writeln!(out);
        }
    }

    if let Some(summary) = diagnostics_summary(&report.diagnostics) {
        let _ = writeln!(out, "Skipped or adjusted: {}", summary);
    }
    out
}

/// List the category catalog
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CategoriesArgs {
    pub fn run(self, store: &RecordStore) -> anyhow::Result<()> {
        let categories = available_categories(&store.services().records);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&categories)?);
        } else {
            for category in categories {
                println!("{}", category);
            }
        }
        Ok(())
    }
}
