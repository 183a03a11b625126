//! Categorized intelligence sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One class of extractable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntelligenceCategory {
    PhoneNumbers,
    BankAccounts,
    UpiIds,
    PhishingLinks,
    SuspiciousKeywords,
}

impl IntelligenceCategory {
    pub const ALL: [IntelligenceCategory; 5] = [
        IntelligenceCategory::PhoneNumbers,
        IntelligenceCategory::BankAccounts,
        IntelligenceCategory::UpiIds,
        IntelligenceCategory::PhishingLinks,
        IntelligenceCategory::SuspiciousKeywords,
    ];

    /// Categories that identify a concrete payment or contact channel.
    /// Keywords are supporting evidence only.
    pub const ACTIONABLE: [IntelligenceCategory; 4] = [
        IntelligenceCategory::UpiIds,
        IntelligenceCategory::PhishingLinks,
        IntelligenceCategory::PhoneNumbers,
        IntelligenceCategory::BankAccounts,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntelligenceCategory::PhoneNumbers => "phoneNumbers",
            IntelligenceCategory::BankAccounts => "bankAccounts",
            IntelligenceCategory::UpiIds => "upiIds",
            IntelligenceCategory::PhishingLinks => "phishingLinks",
            IntelligenceCategory::SuspiciousKeywords => "suspiciousKeywords",
        }
    }
}

impl fmt::Display for IntelligenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deduplicated identifiers gathered from one message or a whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intelligence {
    pub phone_numbers: BTreeSet<String>,
    pub bank_accounts: BTreeSet<String>,
    pub upi_ids: BTreeSet<String>,
    pub phishing_links: BTreeSet<String>,
    pub suspicious_keywords: BTreeSet<String>,
}

impl Intelligence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set for `category`.
    pub fn get(&self, category: IntelligenceCategory) -> &BTreeSet<String> {
        match category {
            IntelligenceCategory::PhoneNumbers => &self.phone_numbers,
            IntelligenceCategory::BankAccounts => &self.bank_accounts,
            IntelligenceCategory::UpiIds => &self.upi_ids,
            IntelligenceCategory::PhishingLinks => &self.phishing_links,
            IntelligenceCategory::SuspiciousKeywords => &self.suspicious_keywords,
        }
    }

    fn get_mut(&mut self, category: IntelligenceCategory) -> &mut BTreeSet<String> {
        match category {
            IntelligenceCategory::PhoneNumbers => &mut self.phone_numbers,
            IntelligenceCategory::BankAccounts => &mut self.bank_accounts,
            IntelligenceCategory::UpiIds => &mut self.upi_ids,
            IntelligenceCategory::PhishingLinks => &mut self.phishing_links,
            IntelligenceCategory::SuspiciousKeywords => &mut self.suspicious_keywords,
        }
    }

    /// Adds a value. Returns false if it was already present.
    pub fn insert(&mut self, category: IntelligenceCategory, value: impl Into<String>) -> bool {
        self.get_mut(category).insert(value.into())
    }

    /// Adds every value of `other` into `self`.
    pub fn absorb(&mut self, other: &Intelligence) {
        for category in IntelligenceCategory::ALL {
            let target = self.get_mut(category);
            target.extend(other.get(category).iter().cloned());
        }
    }

    /// Number of actionable categories holding at least one value.
    pub fn actionable_category_count(&self) -> usize {
        IntelligenceCategory::ACTIONABLE
            .iter()
            .filter(|c| !self.get(**c).is_empty())
            .count()
    }

    /// Total number of values across all categories.
    pub fn total_items(&self) -> usize {
        IntelligenceCategory::ALL
            .iter()
            .map(|c| self.get(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_categories() {
        let mut intel = Intelligence::new();
        intel.insert(IntelligenceCategory::UpiIds, "test@paytm");

        let json = serde_json::to_value(&intel).unwrap();
        assert_eq!(json["upiIds"][0], "test@paytm");
        assert!(json["phoneNumbers"].as_array().unwrap().is_empty());
        assert!(json.get("bankAccounts").is_some());
        assert!(json.get("phishingLinks").is_some());
        assert!(json.get("suspiciousKeywords").is_some());
    }

    #[test]
    fn category_wire_names_match_serde() {
        for category in IntelligenceCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut intel = Intelligence::new();
        assert!(intel.insert(IntelligenceCategory::PhoneNumbers, "9876543210"));
        assert!(!intel.insert(IntelligenceCategory::PhoneNumbers, "9876543210"));
        assert_eq!(intel.total_items(), 1);
    }

    #[test]
    fn keywords_are_not_actionable() {
        let mut intel = Intelligence::new();
        intel.insert(IntelligenceCategory::SuspiciousKeywords, "otp");
        intel.insert(IntelligenceCategory::SuspiciousKeywords, "bank");
        assert_eq!(intel.actionable_category_count(), 0);

        intel.insert(IntelligenceCategory::UpiIds, "x@ybl");
        intel.insert(IntelligenceCategory::PhishingLinks, "http://x.in");
        assert_eq!(intel.actionable_category_count(), 2);
    }
}
