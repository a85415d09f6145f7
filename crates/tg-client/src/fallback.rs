//! Built-in example tables used when the backend index is unavailable.

use crate::types::ExampleTable;

/// Example tables offered when the backend index cannot be fetched.
///
/// Covers tracking, marketing, sales, user, finance and event data so the
/// example picker stays useful offline. Never empty.
#[must_use]
pub fn fallback_examples() -> Vec<ExampleTable> {
    vec![
        ExampleTable::new(
            "tracking.AdClickEvent",
            "Ad Click Event",
            "User ad click tracking",
        ),
        ExampleTable::new(
            "marketing.CampaignSummary",
            "Campaign Summary",
            "Marketing campaign data",
        ),
        ExampleTable::new(
            "sales.OrderHeader",
            "Order Header",
            "Sales order information",
        ),
        ExampleTable::new("user.ProfileSnapshot", "User Profile", "User profile data"),
        ExampleTable::new(
            "finance.InvoiceItem",
            "Invoice Item",
            "Financial invoice details",
        ),
        ExampleTable::new("event.FunnelStep", "Funnel Step", "User funnel analytics"),
        ExampleTable::new("tracking.PageView", "Page View", "Page view tracking"),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_fallback_has_at_least_seven_entries() {
        assert!(fallback_examples().len() >= 7);
    }

    #[test]
    fn test_fallback_entries_complete_and_unique() {
        let tables = fallback_examples();
        let mut names = HashSet::new();
        for table in &tables {
            assert!(!table.name.is_empty());
            assert!(!table.title.is_empty());
            assert!(!table.description.is_empty());
            assert!(names.insert(table.name.as_str()), "duplicate {}", table.name);
        }
    }

    #[test]
    fn test_fallback_covers_distinct_domains() {
        let domains: HashSet<_> = fallback_examples()
            .iter()
            .filter_map(|t| t.name.split_once('.').map(|(domain, _)| domain.to_owned()))
            .collect();
        for domain in ["tracking", "marketing", "sales", "user", "finance", "event"] {
            assert!(domains.contains(domain), "missing {domain}");
        }
    }
}
