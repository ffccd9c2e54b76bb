//! Keyword-scored response selection with fallback escalation.
//!
//! Each turn is scored against the recent conversation context rather than
//! the latest utterance alone, so a keyword keeps matching while it stays in
//! the [`ConversationWindow`].
//!
//! Scoring:
//! 1. `score(rule) = Σ rule.weight` for every keyword contained in the context
//!    (substring containment, so particles and typos around a keyword still
//!    match)
//! 2. Highest score wins; ties go to the rule with more keywords, then to the
//!    earlier rule
//! 3. A best score of zero is a fallback turn
//!
//! Consecutive fallback turns escalate: once the count reaches the persona's
//! threshold a topic-change reply is emitted instead and the count restarts.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chat::ConversationWindow;
use crate::models::{DEFAULT_FALLBACK, Persona, ResponseRule};

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionKind {
    Rule { index: usize, score: u32 },
    Fallback,
    TopicChange,
}

/// The reply chosen for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub response: String,
    pub kind: SelectionKind,
}

/// Escalation phase derived from the fallback counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorPhase {
    Normal,
    /// The next fallback turn will change the topic.
    Escalating,
}

/// Per-session fallback bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorState {
    consecutive_fallbacks: u32,
}

impl SelectorState {
    pub fn consecutive_fallbacks(&self) -> u32 {
        self.consecutive_fallbacks
    }

    pub fn phase(
        &self,
        threshold: u32,
    ) -> SelectorPhase {
        if self.consecutive_fallbacks + 1 >= threshold {
            SelectorPhase::Escalating
        } else {
            SelectorPhase::Normal
        }
    }

    pub fn reset(&mut self) {
        self.consecutive_fallbacks = 0;
    }
}

/// Sum of `rule.weight` over the keywords contained in `context`,
/// saturating at `u32::MAX`.
pub fn score_rule(
    rule: &ResponseRule,
    context: &str,
) -> u32 {
    rule.keywords
        .iter()
        .filter(|keyword| context.contains(keyword.as_str()))
        .fold(0u32, |score, _| score.saturating_add(rule.weight))
}

/// Index and score of the best-matching rule, or `None` when nothing
/// matches.
pub fn best_rule(
    persona: &Persona,
    context: &str,
) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;

    for (index, rule) in persona.rules.iter().enumerate() {
        let score = score_rule(rule, context);
        if score == 0 {
            continue;
        }

        let better = match best {
            None => true,
            Some((best_index, best_score)) => {
                score > best_score
                    || (score == best_score
                        && rule.keywords.len() > persona.rules[best_index].keywords.len())
            }
        };
        if better {
            best = Some((index, score));
        }
    }

    best
}

/// Records `utterance` in `window` and picks a reply.
///
/// `window` and `state` belong to the calling session and must be fed turns
/// in the order they were received. `rng` only drives fallback and
/// topic-change picks; rule matches are deterministic.
pub fn select_response<R>(
    utterance: &str,
    persona: &Persona,
    window: &mut ConversationWindow,
    state: &mut SelectorState,
    rng: &mut R,
) -> Selection
where
    R: Rng + ?Sized,
{
    window.push(utterance);
    let context = window.context();

    if let Some((index, score)) = best_rule(persona, &context) {
        debug!(persona = %persona.id, rule = index, score, "keyword rule matched");
        state.reset();
        return Selection {
            response: persona.rules[index].response.clone(),
            kind: SelectionKind::Rule { index, score },
        };
    }

    state.consecutive_fallbacks += 1;

    if state.consecutive_fallbacks >= persona.threshold() {
        if let Some(response) = persona.topic_change_responses.choose(rng) {
            warn!(
                persona = %persona.id,
                fallbacks = state.consecutive_fallbacks,
                "repeated misses, changing topic"
            );
            state.reset();
            return Selection {
                response: response.clone(),
                kind: SelectionKind::TopicChange,
            };
        }
    }

    debug!(
        persona = %persona.id,
        fallbacks = state.consecutive_fallbacks,
        "no keyword matched"
    );
    let response = persona
        .fallback_responses
        .choose(rng)
        .map_or(DEFAULT_FALLBACK, String::as_str);

    Selection {
        response: response.to_string(),
        kind: SelectionKind::Fallback,
    }
}
