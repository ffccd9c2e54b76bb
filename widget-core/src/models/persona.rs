use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Consecutive fallback turns after which a persona changes the topic.
pub const DEFAULT_ESCALATION_THRESHOLD: u32 = 2;

/// Reply used when a persona ships no fallback pool of its own.
pub const DEFAULT_FALLBACK: &str = "음... 무슨 말인지 잘 모르겠어요. 다시 말해줄래요?";

/// Errors raised when a persona definition is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersonaError {
    #[error("persona '{persona}': rule {rule} has no keywords")]
    EmptyKeywords { persona: String, rule: usize },

    #[error("persona '{persona}': rule {rule} has zero weight")]
    ZeroWeight { persona: String, rule: usize },

    #[error("persona '{persona}': rule {rule} has an empty response")]
    EmptyResponse { persona: String, rule: usize },

    #[error("persona '{persona}': escalation threshold must be at least 1")]
    InvalidThreshold { persona: String },
}

/// One keyword rule. Every keyword found in the conversation context adds
/// `weight` to the rule's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRule {
    pub keywords: Vec<String>,
    pub response: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl ResponseRule {
    pub fn new(
        keywords: &[&str],
        response: impl Into<String>,
        weight: u32,
    ) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            response: response.into(),
            weight,
        }
    }
}

/// A conversational character: keyword rules plus fallback pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub escalation_threshold: Option<u32>,
    #[serde(default)]
    pub rules: Vec<ResponseRule>,
    #[serde(default)]
    pub fallback_responses: Vec<String>,
    #[serde(default)]
    pub topic_change_responses: Vec<String>,
}

impl Persona {
    /// Checks every rule and normalizes keywords to trimmed lowercase so
    /// they line up with normalized utterances. Keywords form a set: repeats
    /// left after normalizing are dropped, first occurrence kept.
    ///
    /// # Errors
    ///
    /// Returns [`PersonaError`] for rules without keywords, zero weights,
    /// empty responses, or a zero escalation threshold.
    pub fn validate(mut self) -> Result<Self, PersonaError> {
        if self.escalation_threshold == Some(0) {
            return Err(PersonaError::InvalidThreshold {
                persona: self.id.clone(),
            });
        }

        for (index, rule) in self.rules.iter_mut().enumerate() {
            let mut keywords: Vec<String> = Vec::with_capacity(rule.keywords.len());
            for keyword in rule.keywords.iter().map(|k| k.trim().to_lowercase()) {
                if !keyword.is_empty() && !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }
            rule.keywords = keywords;

            if rule.keywords.is_empty() {
                return Err(PersonaError::EmptyKeywords {
                    persona: self.id.clone(),
                    rule: index,
                });
            }
            if rule.weight == 0 {
                return Err(PersonaError::ZeroWeight {
                    persona: self.id.clone(),
                    rule: index,
                });
            }
            if rule.response.trim().is_empty() {
                return Err(PersonaError::EmptyResponse {
                    persona: self.id.clone(),
                    rule: index,
                });
            }
        }

        Ok(self)
    }

    pub fn threshold(&self) -> u32 {
        self.escalation_threshold
            .unwrap_or(DEFAULT_ESCALATION_THRESHOLD)
    }
}
