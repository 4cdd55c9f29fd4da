//! Service category catalog
//!
//! Filter controls offer the default categories plus any category actually
//! used by a service. A listed category may have no chart rows; the
//! aggregator only emits categories with matching appointments.

use crate::types::{CategoryFilter, Service};

/// Categories offered before any service defines its own
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Haircuts", "Color", "Nails", "Styling"];

/// Default categories followed by service categories in first-seen order.
///
/// Matching is exact, so `"color"` and `"Color"` are both listed.
/// Services without a category contribute nothing.
pub fn available_categories(services: &[Service]) -> Vec<String> {
    let mut categories: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();

    for service in services {
        if let Some(category) = service.category.as_deref() {
            if !category.is_empty() && !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
    }

    categories
}

/// Filter choices in display order: `all` first, then every category
pub fn filter_choices(services: &[Service]) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(
            available_categories(services)
                .into_iter()
                .map(CategoryFilter::Only),
        )
        .collect()
}

/// Next (or previous) choice after `current`, wrapping. Unknown selections
/// restart from `all`.
pub fn cycle_filter(
    choices: &[CategoryFilter],
    current: &CategoryFilter,
    forward: bool,
) -> CategoryFilter {
    if choices.is_empty() {
        return CategoryFilter::All;
    }

    let next = match choices.iter().position(|c| c == current) {
        Some(i) if forward => (i + 1) % choices.len(),
        Some(i) => (i + choices.len() - 1) % choices.len(),
        None => 0,
    };
    choices[next].clone()
}

/// Services grouped under their category label, groups in first-seen order.
/// Services without a category land in `"Uncategorized"`.
pub fn group_by_category(services: &[Service]) -> Vec<(&str, Vec<&Service>)> {
    let mut groups: Vec<(&str, Vec<&Service>)> = Vec::new();
    for service in services {
        let label = service.category_label();
        match groups.iter_mut().find(|(name, _)| *name == label) {
            Some((_, members)) => members.push(service),
            None => groups.push((label, vec![service])),
        }
    }
    groups
}
