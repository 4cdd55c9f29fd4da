//! Insights query and chart types

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Aggregation window, anchored to the reference date
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Current calendar month
    #[default]
    Monthly,
    /// Current calendar year
    Yearly,
}

impl Timeframe {
    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Monthly => Self::Yearly,
            Self::Yearly => Self::Monthly,
        }
    }
}

/// Category selection: everything, or one exact category name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Literal selecting every category
    pub const ALL: &'static str = "all";

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => name == category,
        }
    }

    /// Display label for filter controls
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All Categories",
            Self::Only(name) => name,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => CategoryFilter::ALL.to_string(),
            CategoryFilter::Only(name) => name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Only(name) => f.write_str(name),
        }
    }
}

/// Filter selections for one aggregation call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InsightsQuery {
    pub timeframe: Timeframe,
    pub category: CategoryFilter,
}

/// One category's count and revenue for the active filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub name: String,
    pub count: u64,
    /// Rounded to 2 decimal places
    pub revenue: f64,
}

/// Records the aggregation skipped or resolved by fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsDiagnostics {
    /// Dates not of the form `YYYY-MM-DD` (dropped)
    pub malformed_dates: u64,
    /// Negative or non-finite prices (dropped)
    pub invalid_prices: u64,
    /// Appointments whose service is not in the catalog (grouped as Uncategorized)
    pub unmatched_services: u64,
    /// Catalog entries overridden by a later service with the same folded name
    pub shadowed_services: u64,
}

impl InsightsDiagnostics {
    /// Appointments dropped for data-quality reasons
    pub fn skipped(&self) -> u64 {
        self.malformed_dates + self.invalid_prices
    }

    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Aggregation output: chart rows in first-seen category order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightsReport {
    pub rows: Vec<ChartRow>,
    pub diagnostics: InsightsDiagnostics,
}

impl InsightsReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn total_revenue(&self) -> f64 {
        round_cents(self.rows.iter().map(|r| r.revenue).sum())
    }
}

/// Round a currency amount to 2 decimal places
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
