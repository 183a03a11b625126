//! Entity extraction pipeline.
//!
//! Pulls phone numbers, bank accounts, UPI ids, links and keywords out of a
//! single message. Numeric stages share an [`ExtractionBuffer`]: each stage
//! reads the buffer, records its matches and blanks them out, so later
//! stages never see digits an earlier stage already claimed. The stage
//! order in [`ExtractionStage::PIPELINE`] is therefore part of the contract.
//!
//! Text-token stages (payment ids, links, keywords) read the original text
//! and are independent of the numeric reductions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::keywords::matching_keywords;
use crate::domain::intelligence::{Intelligence, IntelligenceCategory};

/// `+<country code><10 digits>`, optionally separated by a space or hyphen.
static INTERNATIONAL_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+\d{1,3}[\s-]?\d{10}\b").expect("valid regex"));

/// Indian country code written without the plus sign.
static COUNTRY_CODE_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b91[\s-]?[6-9]\d{9}\b").expect("valid regex"));

static LOCAL_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{10}\b").expect("valid regex"));

static BANK_ACCOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{12,18}\b").expect("valid regex"));

static BANKING_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\bbank|\baccount|\bacct\b|\bacc\b|\ba/c\b|\bifsc\b)").expect("valid regex")
});

static PAYMENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._-]+@[A-Za-z]{3,}\b").expect("valid regex"));

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bhttps?://[^\s<>"'()\[\]{}]+"#).expect("valid regex"));

/// Trailing sentence punctuation that is never part of a link.
const LINK_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Working copy of the message that numeric stages consume from.
#[derive(Debug, Clone)]
pub struct ExtractionBuffer {
    remaining: String,
}

impl ExtractionBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            remaining: text.to_string(),
        }
    }

    /// Collects every match of `pattern`, then blanks those matches out.
    ///
    /// Matches are replaced with a single space so neighbouring digits
    /// cannot fuse into a new number.
    pub fn consume(&mut self, pattern: &Regex) -> Vec<String> {
        let found: Vec<String> = pattern
            .find_iter(&self.remaining)
            .map(|m| m.as_str().to_string())
            .collect();
        if !found.is_empty() {
            self.remaining = pattern.replace_all(&self.remaining, " ").into_owned();
        }
        found
    }

    /// The text not yet claimed by any stage.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }
}

/// One step of the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    InternationalPhone,
    CountryCodePhone,
    LocalPhone,
    BankAccount,
    PaymentId,
    Link,
    Keyword,
}

impl ExtractionStage {
    /// Fixed execution order.
    pub const PIPELINE: [ExtractionStage; 7] = [
        ExtractionStage::InternationalPhone,
        ExtractionStage::CountryCodePhone,
        ExtractionStage::LocalPhone,
        ExtractionStage::BankAccount,
        ExtractionStage::PaymentId,
        ExtractionStage::Link,
        ExtractionStage::Keyword,
    ];

    /// Runs the stage, writing its findings into `out`.
    fn run(self, original: &str, buffer: &mut ExtractionBuffer, out: &mut Intelligence) {
        match self {
            ExtractionStage::InternationalPhone => {
                collect_phones(buffer.consume(&INTERNATIONAL_PHONE), out)
            }
            ExtractionStage::CountryCodePhone => {
                collect_phones(buffer.consume(&COUNTRY_CODE_PHONE), out)
            }
            ExtractionStage::LocalPhone => collect_phones(buffer.consume(&LOCAL_PHONE), out),
            ExtractionStage::BankAccount => {
                if !BANKING_CUE.is_match(original) {
                    return;
                }
                for account in buffer.consume(&BANK_ACCOUNT) {
                    out.insert(IntelligenceCategory::BankAccounts, account);
                }
            }
            ExtractionStage::PaymentId => {
                for m in PAYMENT_ID.find_iter(original) {
                    out.insert(IntelligenceCategory::UpiIds, m.as_str());
                }
            }
            ExtractionStage::Link => {
                for m in LINK.find_iter(original) {
                    let link = m.as_str().trim_end_matches(LINK_TRAILING);
                    out.insert(IntelligenceCategory::PhishingLinks, link);
                }
            }
            ExtractionStage::Keyword => {
                let lower = original.to_lowercase();
                for group in matching_keywords(&lower) {
                    out.insert(IntelligenceCategory::SuspiciousKeywords, group.canonical);
                }
            }
        }
    }
}

fn collect_phones(matches: Vec<String>, out: &mut Intelligence) {
    for raw in matches {
        let compact: String = raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
        out.insert(IntelligenceCategory::PhoneNumbers, compact);
    }
}

/// Stateless extractor running the full pipeline over one message.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts all intelligence categories from `text`.
    pub fn extract(&self, text: &str) -> Intelligence {
        let mut buffer = ExtractionBuffer::new(text);
        let mut out = Intelligence::default();
        for stage in ExtractionStage::PIPELINE {
            stage.run(text, &mut buffer, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extract(text: &str) -> Intelligence {
        EntityExtractor::new().extract(text)
    }

    fn set(items: &[&str]) -> std::collections::BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn international_number_is_not_reported_twice() {
        let intel = extract("Call +919876543210 now");
        assert_eq!(intel.phone_numbers, set(&["+919876543210"]));
    }

    #[test]
    fn overlapping_phone_forms_do_not_multiply() {
        let intel = extract("Call +919876543210 or 9876543210");
        assert_eq!(intel.phone_numbers, set(&["+919876543210", "9876543210"]));
    }

    #[test]
    fn bare_country_code_numbers_are_compacted() {
        let intel = extract("whatsapp 91-9876543210 or 91 8765432109");
        assert_eq!(intel.phone_numbers, set(&["919876543210", "918765432109"]));
    }

    #[test]
    fn bank_account_requires_banking_cue() {
        let with_cue = extract("account number 123456789012");
        assert_eq!(with_cue.bank_accounts, set(&["123456789012"]));

        let without_cue = extract("my lucky number is 123456789012");
        assert!(without_cue.bank_accounts.is_empty());
        assert!(without_cue.phone_numbers.is_empty());
    }

    #[test]
    fn short_banking_abbreviations_count_as_cue() {
        assert_eq!(
            extract("send to a/c 1234567890123456").bank_accounts,
            set(&["1234567890123456"])
        );
        assert_eq!(
            extract("acc 998877665544").bank_accounts,
            set(&["998877665544"])
        );
    }

    #[test]
    fn phone_digits_are_not_reused_as_accounts() {
        let intel = extract("Bank helpline +919876543210, account 1234567890123456");
        assert_eq!(intel.phone_numbers, set(&["+919876543210"]));
        assert_eq!(intel.bank_accounts, set(&["1234567890123456"]));
    }

    #[test]
    fn payment_ids_come_from_original_text() {
        let intel = extract("Pay to scammer.fraud@ybl or test@paytm, not a@b");
        assert_eq!(intel.upi_ids, set(&["scammer.fraud@ybl", "test@paytm"]));
    }

    #[test]
    fn links_stop_at_brackets_and_trailing_punctuation() {
        let intel = extract("Click (http://bit.ly/kyc-update) or https://sbi-verify.xyz/login.");
        assert_eq!(
            intel.phishing_links,
            set(&["http://bit.ly/kyc-update", "https://sbi-verify.xyz/login"])
        );
    }

    #[test]
    fn keywords_are_reported_canonically() {
        let intel = extract("Update your KYC, your acount is blockd");
        assert_eq!(
            intel.suspicious_keywords,
            set(&["account", "blocked", "kyc", "update"])
        );
    }

    #[test]
    fn duplicates_collapse_within_one_message() {
        let intel = extract("pay test@paytm test@paytm test@paytm");
        assert_eq!(intel.upi_ids.len(), 1);
    }

    #[test]
    fn buffer_consumption_blanks_matches() {
        let mut buffer = ExtractionBuffer::new("a 1234567890 b");
        assert_eq!(buffer.consume(&LOCAL_PHONE), vec!["1234567890".to_string()]);
        assert_eq!(buffer.remaining(), "a   b");
        assert!(buffer.consume(&LOCAL_PHONE).is_empty());
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("@@@ +++ ///").is_empty());
    }

    proptest! {
        #[test]
        fn extraction_never_panics(text in ".{0,300}") {
            let _ = extract(&text);
        }
    }
}
