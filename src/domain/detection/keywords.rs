//! Scam keyword catalogue and text normalization.
//!
//! Keywords are grouped: each group has one canonical spelling plus the
//! variant forms (misspellings, joined words) fraud senders use to dodge
//! naive filters. A group counts once no matter how many of its forms
//! appear, and is always reported under its canonical spelling.
//!
//! Every form is lowercase and restricted to `[a-z0-9 ]`, so it can be
//! matched directly against [`normalize_text`] output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Broad family a keyword belongs to. Used when describing tactics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    /// OTP, KYC, verification demands.
    Authentication,
    /// Time pressure and threats of blocking.
    Urgency,
    /// Banking and payment vocabulary.
    Banking,
    /// Regional payment apps and bank brands.
    PaymentBrand,
    /// Government bodies and benefit schemes.
    Government,
    /// Identity documents.
    IdentityDocument,
    /// Verbs that push the target to act on a link or app.
    PhishingAction,
    /// Prizes, refunds, cashback.
    RewardBait,
}

/// A canonical keyword together with the forms that count as it.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub forms: &'static [&'static str],
}

impl KeywordGroup {
    /// Returns true if any form of this keyword occurs in `haystack`.
    pub fn occurs_in(&self, haystack: &str) -> bool {
        self.forms.iter().any(|form| haystack.contains(form))
    }
}

const fn group(
    canonical: &'static str,
    category: KeywordCategory,
    forms: &'static [&'static str],
) -> KeywordGroup {
    KeywordGroup {
        canonical,
        category,
        forms,
    }
}

use KeywordCategory::*;

/// The fixed scam keyword catalogue.
pub static SCAM_KEYWORDS: &[KeywordGroup] = &[
    // Authentication
    group("otp", Authentication, &["otp", "one time password"]),
    group("kyc", Authentication, &["kyc"]),
    group("verify", Authentication, &["verify", "verfy", "verifiy", "verification"]),
    group("cvv", Authentication, &["cvv"]),
    group("pin", Authentication, &["upi pin", "atm pin", "mpin"]),
    // Urgency
    group("urgent", Urgency, &["urgent", "urgnt"]),
    group("immediate", Urgency, &["immediate", "immidiate", "asap"]),
    group("blocked", Urgency, &["blocked", "blockd", "block"]),
    group("suspended", Urgency, &["suspend", "suspnd"]),
    group("locked", Urgency, &["locked", "freeze", "frozen"]),
    group("expire", Urgency, &["expire", "expiry"]),
    group("penalty", Urgency, &["penalty", "fine amount"]),
    group("legal action", Urgency, &["legal action", "arrest", "warrant"]),
    // Banking
    group("bank", Banking, &["bank", "banck", "bnk"]),
    group("account", Banking, &["account", "acount", "accnt"]),
    group("upi", Banking, &["upi"]),
    group("debit card", Banking, &["debit card", "credit card", "atm card"]),
    group("transfer", Banking, &["transfer", "send money"]),
    // Payment apps and bank brands
    group("sbi", PaymentBrand, &["sbi", "state bank"]),
    group("hdfc", PaymentBrand, &["hdfc"]),
    group("icici", PaymentBrand, &["icici"]),
    group("axis bank", PaymentBrand, &["axis bank"]),
    group("paytm", PaymentBrand, &["paytm"]),
    group("phonepe", PaymentBrand, &["phonepe", "phone pe"]),
    group("google pay", PaymentBrand, &["gpay", "google pay", "googlepay"]),
    group("bhim", PaymentBrand, &["bhim"]),
    // Government
    group("rbi", Government, &["rbi", "reserve bank"]),
    group("income tax", Government, &["income tax", "incometax"]),
    group("pm kisan", Government, &["pm kisan", "pmkisan"]),
    group("government scheme", Government, &["govt scheme", "government scheme", "subsidy"]),
    group("customs", Government, &["customs"]),
    group("cyber crime", Government, &["cyber crime", "cybercrime", "cyber cell"]),
    // Identity documents
    group("aadhaar", IdentityDocument, &["aadhaar", "aadhar", "adhar"]),
    group("pan card", IdentityDocument, &["pan card", "pan number", "pancard"]),
    group("voter id", IdentityDocument, &["voter id"]),
    // Phishing actions
    group("click", PhishingAction, &["click", "clk"]),
    group("link", PhishingAction, &["link", "lnk"]),
    group("update", PhishingAction, &["update", "kycupdate"]),
    group("confirm", PhishingAction, &["confirm"]),
    group("download", PhishingAction, &["download", "install", "anydesk", "teamviewer"]),
    // Reward bait
    group("refund", RewardBait, &["refund"]),
    group("cashback", RewardBait, &["cashback", "cash back"]),
    group("prize", RewardBait, &["prize", "reward"]),
    group("lottery", RewardBait, &["lottery", "lucky draw"]),
    group("winner", RewardBait, &["winner", "you won", "you have won"]),
];

/// Looks up the category of a canonical keyword.
pub fn category_of(canonical: &str) -> Option<KeywordCategory> {
    SCAM_KEYWORDS
        .iter()
        .find(|g| g.canonical == canonical)
        .map(|g| g.category)
}

/// Returns the canonical keywords occurring in `haystack`, in catalogue order.
pub fn matching_keywords(haystack: &str) -> impl Iterator<Item = &'static KeywordGroup> + '_ {
    SCAM_KEYWORDS.iter().filter(move |g| g.occurs_in(haystack))
}

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lowercases, replaces everything outside `[a-z0-9 ]` with a space, and
/// collapses whitespace runs.
pub fn normalize_text(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NON_ALPHANUMERIC.replace_all(&lower, " ");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}
