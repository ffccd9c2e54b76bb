//! Persona chat: a rolling conversation window and keyword-scored replies.

mod selector;
mod window;

pub use selector::{
    Selection, SelectionKind, SelectorPhase, SelectorState, best_rule, score_rule,
    select_response,
};
pub use window::{ConversationWindow, WINDOW_CAPACITY, normalize};

use rand::Rng;

use crate::models::Persona;

/// One conversation with one persona.
///
/// Owns the window and fallback state so turns from different sessions
/// never interfere.
#[derive(Debug, Clone)]
pub struct ChatSession<'p> {
    persona: &'p Persona,
    window: ConversationWindow,
    state: SelectorState,
}

impl<'p> ChatSession<'p> {
    pub fn new(persona: &'p Persona) -> Self {
        Self {
            persona,
            window: ConversationWindow::new(),
            state: SelectorState::default(),
        }
    }

    pub fn persona(&self) -> &Persona {
        self.persona
    }

    pub fn greeting(&self) -> Option<&str> {
        self.persona.greeting.as_deref()
    }

    /// Applies one user turn and returns the reply.
    pub fn respond<R>(
        &mut self,
        utterance: &str,
        rng: &mut R,
    ) -> Selection
    where
        R: Rng + ?Sized,
    {
        select_response(
            utterance,
            self.persona,
            &mut self.window,
            &mut self.state,
            rng,
        )
    }

    pub fn window(&self) -> &ConversationWindow {
        &self.window
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn phase(&self) -> SelectorPhase {
        self.state.phase(self.persona.threshold())
    }

    /// Forgets the conversation so far.
    pub fn reset(&mut self) {
        self.window.clear();
        self.state.reset();
    }
}
