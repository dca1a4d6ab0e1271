//! Per-session conversation state.

use serde::{Deserialize, Serialize};

use crate::dialog::collector::SelectionEntry;
use crate::dialog::prompts;
use crate::dialog::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Answers accumulated stage by stage. Discarded on reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answers {
    pub name: String,
    pub institution: String,
    pub segment: Option<String>,
    /// Confirmed department list, used verbatim for every subsequent
    /// routine lookup in this conversation.
    pub departments: Vec<String>,
    pub include_steps: bool,
    pub feedback: Option<String>,
}

/// The aggregate of one live conversation: stage, answers, selection and
/// transcript. Owned by the caller; the engine mutates it turn by turn and
/// never rolls a stage back short of a full reset.
#[derive(Debug, Clone)]
pub struct Conversation {
    stage: Stage,
    pub answers: Answers,
    pub selection: Vec<SelectionEntry>,
    pub transcript: Vec<Message>,
}

impl Conversation {
    /// Fresh conversation, transcript seeded with the greeting.
    pub fn new() -> Self {
        Self {
            stage: Stage::AskName,
            answers: Answers::default(),
            selection: Vec::new(),
            transcript: vec![Message {
                role: Role::Assistant,
                content: prompts::GREETING.to_string(),
            }],
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Forward-only stage move. Resets go through [`Conversation::reset`].
    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Wholesale reset back to `AskName` with empty answers and selection.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn push_user(&mut self, content: &str) {
        self.transcript.push(Message {
            role: Role::User,
            content: content.to_string(),
        });
    }

    pub(crate) fn push_assistant(&mut self, content: &str) {
        self.transcript.push(Message {
            role: Role::Assistant,
            content: content.to_string(),
        });
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
