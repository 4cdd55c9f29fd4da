//! Services for record storage and insights aggregation

pub mod categories;
pub mod directory;
pub mod insights;
pub mod normalizer;
pub mod store;

pub use categories::{
    available_categories, cycle_filter, filter_choices, group_by_category, DEFAULT_CATEGORIES,
};
pub use directory::{assign_staff, StaffDirectory};
pub use insights::{CategoryLookup, InsightsAggregator};
pub use normalizer::{normalize_service_name, parse_year_month};
pub use store::{Listing, RecordStore, SalonDocument, Snapshot};
