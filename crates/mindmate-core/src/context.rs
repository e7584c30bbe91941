//! Conversation context: bounded sliding window of dialogue turns and the
//! prompt builder that serializes it for the generation chain.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::prompts::COMPANION_PREAMBLE;

/// Maximum number of turns retained; oldest evicted first.
pub const WINDOW_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Tag used in the serialized prompt; keeps speaker attribution
    /// recoverable from the flat text.
    pub fn tag(self) -> &'static str {
        match self {
            Speaker::User => "Student",
            Speaker::Assistant => "MindMate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// Ordered window of the most recent dialogue turns. Mutated only by
/// appending; exceeding [`WINDOW_CAPACITY`] evicts the oldest turn.
#[derive(Debug, Clone, Default)]
pub struct ConversationWindow {
    turns: VecDeque<Turn>,
}

impl ConversationWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a window from existing turns, keeping only the newest
    /// [`WINDOW_CAPACITY`] of them.
    pub fn from_turns(turns: impl IntoIterator<Item = Turn>) -> Self {
        let mut window = Self::new();
        for turn in turns {
            window.push(turn.speaker, turn.text);
        }
        window
    }

    /// Appends a turn, evicting the oldest once the window is full.
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        if self.turns.len() == WINDOW_CAPACITY {
            self.turns.pop_front();
        }
        self.turns.push_back(Turn {
            speaker,
            text: text.into(),
        });
    }

    /// Turns in chronological order (oldest first).
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Serializes the preamble plus the retained turns into one prompt string,
/// chronological order, each turn prefixed with its speaker tag. Pure.
pub fn build_prompt(window: &ConversationWindow) -> String {
    let mut prompt = String::from(COMPANION_PREAMBLE);
    prompt.push_str("\n\n");
    for turn in window.turns() {
        prompt.push_str(turn.speaker.tag());
        prompt.push_str(": ");
        prompt.push_str(&turn.text);
        prompt.push('\n');
    }
    prompt
}
