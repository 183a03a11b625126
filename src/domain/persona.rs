//! Honeypot persona configuration.
//!
//! The persona is what the reply generator pretends to be. Channel and
//! locale metadata only shape the style of replies; they never influence
//! classification or extraction.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

const BASE_PROMPT: &str = "You are a normal Indian user. \
You are polite, slightly scared, and not very technical. \
You believe the other person is a real bank or support executive.

Behavior rules:
- Ask step-by-step questions like a confused customer.
- If payment is mentioned, ask HOW and WHERE to pay.
- If verification is mentioned, ask for the exact process.
- If links or apps are mentioned, ask them to resend or clarify.
- Never directly ask for sensitive details.
- Let the other person reveal UPI IDs, account numbers, or links naturally.

Never say you are an AI.
Never say you are detecting scam.
Always sound human and genuine.";

/// Reply given to senders that have not tripped the classifier.
pub const BENIGN_REPLY: &str = "Okay, noted.";

const CONFUSED_BAIT: &str = "I am a bit confused. Can you please explain once again?";

/// Fallback replies used when the reply generator fails or is absent.
pub const CANNED_BAITS: &[&str] = &[
    CONFUSED_BAIT,
    "Sorry sir, my phone is very slow. Which number should I send it to?",
    "I am trying but it is not working. Can you tell me the steps again?",
    "My son usually helps me with this. Where exactly do I need to pay?",
    "Okay sir, I am opening the app now. What should I type?",
    "Is there any other way? Please send the details once more.",
];

/// Picks one canned bait at random.
pub fn canned_bait() -> &'static str {
    CANNED_BAITS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(CONFUSED_BAIT)
}

/// Channels where replies should read like short text messages.
const SHORT_FORM_CHANNELS: &[&str] = &["sms", "whatsapp", "telegram", "chat"];

const SHORT_REPLY_WORDS: u32 = 25;
const SHORT_REPLY_TOKENS: u32 = 80;
const DEFAULT_REPLY_TOKENS: u32 = 200;

/// Caller-supplied conversation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMetadata {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Styling instructions handed to the reply generator.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaConfig {
    pub max_words: Option<u32>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub language: Option<String>,
    pub regional_tone: Option<String>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            max_words: None,
            max_tokens: DEFAULT_REPLY_TOKENS,
            temperature: 0.7,
            language: None,
            regional_tone: None,
        }
    }
}

impl PersonaConfig {
    /// Derives reply styling from conversation metadata.
    pub fn from_metadata(metadata: &ConversationMetadata, temperature: f32) -> Self {
        let mut persona = Self {
            temperature,
            ..Self::default()
        };

        let short_form = metadata
            .channel
            .as_deref()
            .map(|c| SHORT_FORM_CHANNELS.contains(&c.trim().to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if short_form {
            persona.max_words = Some(SHORT_REPLY_WORDS);
            persona.max_tokens = SHORT_REPLY_TOKENS;
        }

        persona.language = metadata
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        persona.regional_tone = metadata.locale.as_deref().and_then(regional_tone_for);
        persona
    }

    /// Full system prompt for the generator.
    pub fn system_prompt(&self) -> String {
        let mut prompt = BASE_PROMPT.to_string();
        if let Some(words) = self.max_words {
            prompt.push_str(&format!(
                "\n\nReply like a text message: at most {} words, no formatting.",
                words
            ));
        }
        if let Some(language) = &self.language {
            prompt.push_str(&format!("\n\nReply in {}.", language));
        }
        if let Some(tone) = &self.regional_tone {
            prompt.push_str("\n\n");
            prompt.push_str(tone);
        }
        prompt
    }
}

fn regional_tone_for(locale: &str) -> Option<String> {
    let locale = locale.trim().to_ascii_uppercase();
    let region = locale.rsplit(['-', '_']).next().unwrap_or(&locale);
    match region {
        "IN" => Some(
            "Use natural Indian English, address the other person as sir or madam, \
             and mention everyday details like your bank branch or your son helping with the phone."
                .to_string(),
        ),
        _ => None,
    }
}
