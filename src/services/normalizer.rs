//! Join-key normalization and appointment date parsing
//!
//! Appointments reference services by free-text name, so both sides are
//! folded to a canonical form before lookup.

/// Normalize a service name to its case-insensitive join key.
///
/// # Examples
/// ```
/// use salontrack::services::normalizer::normalize_service_name;
///
/// assert_eq!(normalize_service_name("Women's Haircut"), "women's haircut");
/// ```
pub fn normalize_service_name(name: &str) -> String {
    name.to_lowercase()
}

/// Parse the year and 1-based month out of a `YYYY-MM-DD` date string.
///
/// The string must split on `-` into exactly three parts; the first two must
/// be integers. The day part is not inspected. Anything else yields `None`.
///
/// # Examples
/// ```
/// use salontrack::services::normalizer::parse_year_month;
///
/// assert_eq!(parse_year_month("2025-11-08"), Some((2025, 11)));
/// assert_eq!(parse_year_month("2025/11/08"), None);
/// ```
pub fn parse_year_month(date: &str) -> Option<(i32, u32)> {
    let mut parts = date.split('-');
    let (year, month, _day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let year = year.trim().parse::<i32>().ok()?;
    let month = month.trim().parse::<u32>().ok()?;
    Some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Name normalization ==========

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_service_name("Men's Haircut"), "men's haircut");
    }

    #[test]
    fn test_normalize_case_variants_collide() {
        assert_eq!(
            normalize_service_name("WOMEN'S HAIRCUT"),
            normalize_service_name("women's haircut")
        );
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(normalize_service_name("Épilation"), "épilation");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        assert_eq!(normalize_service_name(" Trim "), " trim ");
    }

    #[test]
    fn test_normalize_empty_string() {
        assert_eq!(normalize_service_name(""), "");
    }

    // ========== Date parsing ==========

    #[test]
    fn test_parse_valid_date() {
        assert_eq!(parse_year_month("2025-11-08"), Some((2025, 11)));
    }

    #[test]
    fn test_parse_month_is_one_based() {
        assert_eq!(parse_year_month("2025-01-31"), Some((2025, 1)));
        assert_eq!(parse_year_month("2025-12-01"), Some((2025, 12)));
    }

    #[test]
    fn test_parse_wrong_separator() {
        assert_eq!(parse_year_month("2025/11/08"), None);
    }

    #[test]
    fn test_parse_too_few_parts() {
        assert_eq!(parse_year_month("2025-11"), None);
        assert_eq!(parse_year_month(""), None);
    }

    #[test]
    fn test_parse_too_many_parts() {
        assert_eq!(parse_year_month("2025-11-08-01"), None);
    }

    #[test]
    fn test_parse_non_numeric_components() {
        assert_eq!(parse_year_month("year-11-08"), None);
        assert_eq!(parse_year_month("2025-nov-08"), None);
    }

    #[test]
    fn test_parse_day_not_inspected() {
        assert_eq!(parse_year_month("2025-11-xx"), Some((2025, 11)));
        assert_eq!(parse_year_month("2025-11-08T10:00"), Some((2025, 11)));
    }
}
