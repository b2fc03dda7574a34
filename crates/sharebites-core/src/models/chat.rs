// ABOUTME: Chat turn, transcript, and support-chat flow input/output shapes
// ABOUTME: The transcript is append-only and knows which leading turns are display-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits::MAX_CHAT_MESSAGE_CHARS;
use crate::errors::ValidationError;
use crate::validation::{require_max_chars, require_non_blank, Validate};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person using the widget
    User,
    /// The generative model
    Model,
}

impl ChatRole {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One text fragment of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPart {
    /// Fragment text
    pub text: String,
}

/// One exchange unit in a conversation; never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Author of the turn
    pub role: ChatRole,
    /// Ordered text parts
    pub parts: Vec<ChatPart>,
}

impl ChatTurn {
    /// Create a single-part turn
    #[must_use]
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![ChatPart { text: text.into() }],
        }
    }

    /// Create a user turn
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    /// Create a model turn
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }

    /// All parts joined into one string
    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// A transcript turn plus the display metadata the widget keeps for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Display identifier
    pub id: Uuid,
    /// The turn itself
    #[serde(flatten)]
    pub turn: ChatTurn,
    /// When the turn was appended
    pub created_at: DateTime<Utc>,
}

/// Ordered record of one widget session's turns.
///
/// Insertion order is conversation order. A leading run of display-only
/// turns (the seeded greeting) is shown to the user but never replayed to
/// the model.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    entries: Vec<TranscriptEntry>,
    display_only: usize,
}

impl ChatTranscript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript whose first turn is a display-only model greeting
    #[must_use]
    pub fn seeded(greeting: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.push(ChatTurn::model(greeting));
        transcript.display_only = 1;
        transcript
    }

    /// Append a turn and return the stored entry
    pub fn push(&mut self, turn: ChatTurn) -> &TranscriptEntry {
        let index = self.entries.len();
        self.entries.push(TranscriptEntry {
            id: Uuid::new_v4(),
            turn,
            created_at: Utc::now(),
        });
        &self.entries[index]
    }

    /// All entries in display order
    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Turns in display order, greeting included
    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.entries.iter().map(|entry| &entry.turn)
    }

    /// Turns to replay to the model, greeting excluded
    #[must_use]
    pub fn history(&self) -> Vec<ChatTurn> {
        self.entries[self.display_only..]
            .iter()
            .map(|entry| entry.turn.clone())
            .collect()
    }

    /// Number of entries, greeting included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been appended
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

/// Input of the support-chat flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInput {
    /// The latest message from the user
    pub user_message: String,
    /// Conversation history up to (not including) `user_message`
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl Validate for ChatInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("userMessage", &self.user_message)?;
        require_max_chars("userMessage", &self.user_message, MAX_CHAT_MESSAGE_CHARS)?;
        if let Some(index) = self.history.iter().position(|turn| turn.parts.is_empty()) {
            return Err(ValidationError::invalid_format(
                "history",
                format!("turn {index} has no parts"),
            ));
        }
        Ok(())
    }
}

/// Output of the support-chat flow; never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOutput {
    /// The chatbot's reply
    pub bot_response: String,
}
