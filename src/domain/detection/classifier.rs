//! Heuristic scam classifier.
//!
//! Scores a single message. Urgency phrasing is a strong signal on its own;
//! otherwise at least two distinct catalogue keywords are required.
//! Classification never fails: text with no signal is simply not a scam.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::keywords::{matching_keywords, normalize_text};

/// Confidence reported for every non-scam verdict.
pub const BENIGN_CONFIDENCE: f64 = 0.3;

/// Upper bound on any scam confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

const URGENCY_BASE: f64 = 0.75;
const KEYWORD_BASE: f64 = 0.70;
const PER_MATCH: f64 = 0.05;
const MIN_KEYWORD_MATCHES: usize = 2;

/// Urgency patterns, evaluated against normalized text.
static URGENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bverify(?:\s+\w+){0,3}?\s+(?:now|immediately|urgently|asap|today)\b",
        r"\baccounts?\b(?:\s+\w+){0,6}?\s+(?:block|blocked|suspend|suspended|freeze|frozen|locked|deactivated|closed)\b",
        r"\bimmediate(?:ly)?\s+action\b",
        r"\bwithin\s+\d+\s+(?:minutes?|mins?|hours?|hrs?)\b",
        r"\bact\s+(?:now|fast|immediately)\b",
        r"\b(?:last|final)\s+(?:warning|chance|reminder)\b",
        r"\b(?:today|tonight)\s+itself\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid urgency pattern"))
    .collect()
});

/// Verdict for one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub is_scam: bool,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub urgency_matches: usize,
    pub keyword_matches: usize,
}

impl Classification {
    fn benign(urgency_matches: usize, keyword_matches: usize) -> Self {
        Self {
            is_scam: false,
            confidence: BENIGN_CONFIDENCE,
            urgency_matches,
            keyword_matches,
        }
    }
}

/// Stateless keyword and urgency-pattern classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScamClassifier;

impl ScamClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies `text`. Rules are checked in order and the first match wins:
    ///
    /// 1. any urgency pattern: scam, `min(0.75 + 0.05 * patterns, 0.95)`
    /// 2. two or more distinct keywords: scam, `min(0.70 + 0.05 * keywords, 0.95)`
    /// 3. otherwise not a scam, confidence 0.3
    pub fn classify(&self, text: &str) -> Classification {
        let normalized = normalize_text(text);

        let keyword_matches = matching_keywords(&normalized).count();
        let urgency_matches = URGENCY_PATTERNS
            .iter()
            .filter(|p| p.is_match(&normalized))
            .count();

        if urgency_matches > 0 {
            return Classification {
                is_scam: true,
                confidence: capped(URGENCY_BASE, urgency_matches),
                urgency_matches,
                keyword_matches,
            };
        }

        if keyword_matches >= MIN_KEYWORD_MATCHES {
            return Classification {
                is_scam: true,
                confidence: capped(KEYWORD_BASE, keyword_matches),
                urgency_matches,
                keyword_matches,
            };
        }

        Classification::benign(urgency_matches, keyword_matches)
    }
}

fn capped(base: f64, matches: usize) -> f64 {
    (base + PER_MATCH * matches as f64).min(MAX_CONFIDENCE)
}
