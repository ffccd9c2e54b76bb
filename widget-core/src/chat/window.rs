use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of recent utterances kept for keyword matching.
pub const WINDOW_CAPACITY: usize = 3;

/// Trims and lowercases an utterance.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// The most recent normalized utterances of one session, oldest first.
///
/// Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationWindow {
    capacity: usize,
    utterances: VecDeque<String>,
}

impl Default for ConversationWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationWindow {
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    /// A window of `capacity` utterances (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            utterances: VecDeque::with_capacity(capacity),
        }
    }

    /// Normalizes `utterance` and appends it, evicting the oldest entry when
    /// full.
    pub fn push(
        &mut self,
        utterance: &str,
    ) {
        if self.utterances.len() == self.capacity {
            self.utterances.pop_front();
        }
        self.utterances.push_back(normalize(utterance));
    }

    /// All utterances joined with a space.
    pub fn context(&self) -> String {
        self.utterances
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.utterances.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn clear(&mut self) {
        self.utterances.clear();
    }
}
