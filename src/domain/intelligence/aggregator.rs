//! Session-scoped intelligence aggregation.

use super::Intelligence;

/// Merges per-message extractions into a session's running intelligence.
///
/// The merge is a per-category set union: it never drops a value, and
/// merging the same extraction twice is the same as merging it once.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelligenceAggregator;

impl IntelligenceAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Returns the union of `existing` and `extraction`.
    pub fn merge(&self, existing: &Intelligence, extraction: &Intelligence) -> Intelligence {
        let mut merged = existing.clone();
        merged.absorb(extraction);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::EntityExtractor;
    use crate::domain::intelligence::IntelligenceCategory;

    #[test]
    fn merge_is_idempotent() {
        let aggregator = IntelligenceAggregator::new();
        let extraction =
            EntityExtractor::new().extract("Pay test@paytm or call +919876543210, urgent");

        let once = aggregator.merge(&Intelligence::new(), &extraction);
        let twice = aggregator.merge(&once, &extraction);

        assert_eq!(once, twice);
    }

    #[test]
    fn merge_never_shrinks() {
        let aggregator = IntelligenceAggregator::new();
        let mut existing = Intelligence::new();
        existing.insert(IntelligenceCategory::UpiIds, "old@ybl");

        let mut extraction = Intelligence::new();
        extraction.insert(IntelligenceCategory::UpiIds, "new@paytm");
        extraction.insert(IntelligenceCategory::PhishingLinks, "http://bad.link");

        let merged = aggregator.merge(&existing, &extraction);

        assert!(merged.upi_ids.contains("old@ybl"));
        assert!(merged.upi_ids.contains("new@paytm"));
        assert_eq!(merged.phishing_links.len(), 1);
        assert_eq!(merged.total_items(), 3);
    }

    #[test]
    fn merge_preserves_case_as_extracted() {
        let aggregator = IntelligenceAggregator::new();
        let mut a = Intelligence::new();
        a.insert(IntelligenceCategory::UpiIds, "Fraud@Paytm");
        let mut b = Intelligence::new();
        b.insert(IntelligenceCategory::UpiIds, "fraud@paytm");

        assert_eq!(aggregator.merge(&a, &b).upi_ids.len(), 2);
    }
}
