//! Insights aggregation over appointments and the services catalog
//!
//! Appointments are joined to services by case-folded name, filtered to the
//! reference month or year and an optional category, then grouped into one
//! chart row per category with a count and a revenue total.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::services::normalizer::{normalize_service_name, parse_year_month};
use crate::types::{
    round_cents, Appointment, ChartRow, InsightsDiagnostics, InsightsQuery, InsightsReport,
    Service, Timeframe, UNCATEGORIZED,
};

/// Folded service name to category label.
///
/// When two services fold to the same name the later one in source order
/// wins; each override is counted as shadowed.
#[derive(Debug)]
pub struct CategoryLookup<'a> {
    categories: HashMap<String, &'a str>,
    shadowed: u64,
}

impl<'a> CategoryLookup<'a> {
    pub fn build(services: &'a [Service]) -> Self {
        let mut categories = HashMap::with_capacity(services.len());
        let mut shadowed = 0;

        for service in services {
            let key = normalize_service_name(&service.name);
            if categories.insert(key, service.category_label()).is_some() {
                shadowed += 1;
            }
        }

        Self {
            categories,
            shadowed,
        }
    }

    /// Category for an appointment's service name, if the catalog knows it
    pub fn resolve(&self, service_name: &str) -> Option<&'a str> {
        self.categories
            .get(&normalize_service_name(service_name))
            .copied()
    }

    pub fn shadowed(&self) -> u64 {
        self.shadowed
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Aggregator for category insights
pub struct InsightsAggregator;

impl InsightsAggregator {
    /// Aggregate appointments into per-category rows.
    ///
    /// `reference` anchors the timeframe; callers pass today's date outside
    /// of tests. Rows come out in first-seen category order. Returns an empty
    /// report when either input is empty.
    pub fn aggregate(
        appointments: &[Appointment],
        services: &[Service],
        query: &InsightsQuery,
        reference: NaiveDate,
    ) -> InsightsReport {
        if appointments.is_empty() || services.is_empty() {
            return InsightsReport::default();
        }

        let lookup = CategoryLookup::build(services);
        let mut diagnostics = InsightsDiagnostics {
            shadowed_services: lookup.shadowed(),
            ..Default::default()
        };

        let mut rows: Vec<ChartRow> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for appointment in appointments {
            let Some((year, month)) = parse_year_month(&appointment.date) else {
                diagnostics.malformed_dates += 1;
                continue;
            };

            if !Self::in_timeframe(year, month, query.timeframe, reference) {
                continue;
            }

            if !appointment.price.is_finite() || appointment.price < 0.0 {
                diagnostics.invalid_prices += 1;
                continue;
            }

            let category = match lookup.resolve(&appointment.service) {
                Some(category) => category,
                None => {
                    diagnostics.unmatched_services += 1;
                    UNCATEGORIZED
                }
            };

            if !query.category.matches(category) {
                continue;
            }

            let slot = *slots.entry(category).or_insert_with(|| {
                rows.push(ChartRow {
                    name: category.to_string(),
                    count: 0,
                    revenue: 0.0,
                });
                rows.len() - 1
            });

            let row = &mut rows[slot];
            row.count = row.count.saturating_add(1);
            row.revenue += appointment.price;
        }

        for row in &mut rows {
            row.revenue = round_cents(row.revenue);
        }

        InsightsReport { rows, diagnostics }
    }

    /// Whether a parsed year/month falls in the window around `reference`
    pub fn in_timeframe(year: i32, month: u32, timeframe: Timeframe, reference: NaiveDate) -> bool {
        match timeframe {
            Timeframe::Monthly => year == reference.year() && month == reference.month(),
            Timeframe::Yearly => year == reference.year(),
        }
    }
}
