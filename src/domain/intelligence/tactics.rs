//! Free-text tactic notes for evaluator reports.

use super::Intelligence;
use crate::domain::detection::keywords::{category_of, KeywordCategory};

const NO_SPECIFIC_TACTIC: &str = "Sender showed generic fraud indicators.";

/// Summarizes the tactics evidenced by `intel` as one sentence.
pub fn describe_tactics(intel: &Intelligence) -> String {
    let keyword_categories: Vec<KeywordCategory> = intel
        .suspicious_keywords
        .iter()
        .filter_map(|k| category_of(k))
        .collect();
    let used = |category: KeywordCategory| keyword_categories.contains(&category);

    let mut tactics = Vec::new();
    if used(KeywordCategory::Urgency) {
        tactics.push("urgency pressure");
    }
    if used(KeywordCategory::Authentication) || used(KeywordCategory::IdentityDocument) {
        tactics.push("credential and identity harvesting");
    }
    if used(KeywordCategory::Government) {
        tactics.push("impersonation of authorities");
    }
    if used(KeywordCategory::RewardBait) {
        tactics.push("reward bait");
    }
    if !intel.upi_ids.is_empty() || !intel.bank_accounts.is_empty() {
        tactics.push("payment redirection");
    }
    if !intel.phishing_links.is_empty() {
        tactics.push("phishing links");
    }
    if !intel.phone_numbers.is_empty() {
        tactics.push("call-back numbers");
    }

    match tactics.split_last() {
        None => NO_SPECIFIC_TACTIC.to_string(),
        Some((only, [])) => format!("Scammer used {} tactics.", only),
        Some((last, rest)) => format!("Scammer used {} and {} tactics.", rest.join(", "), last),
    }
}
