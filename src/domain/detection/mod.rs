//! Detection - pure, stateless analysis of a single message.
//!
//! - `ScamClassifier` decides whether a message looks like fraud.
//! - `EntityExtractor` pulls actionable identifiers out of it.
//!
//! Both are total functions over arbitrary text and safe to share across
//! threads without synchronization.

mod classifier;
mod extractor;
pub mod keywords;

pub use classifier::{Classification, ScamClassifier, BENIGN_CONFIDENCE, MAX_CONFIDENCE};
pub use extractor::{EntityExtractor, ExtractionBuffer, ExtractionStage};
pub use keywords::{normalize_text, KeywordCategory, KeywordGroup, SCAM_KEYWORDS};
