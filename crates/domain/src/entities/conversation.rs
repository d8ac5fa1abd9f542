//! Conversation history - bounded transcript owned by one agent

use serde::{Deserialize, Serialize};

use super::ChatMessage;
use crate::catalog::{CONTEXT_WINDOW, MAX_HISTORY_ENTRIES};

/// System preamble placed at the top of every prompt
pub const SYSTEM_PREAMBLE: &str = "You are a helpful AI assistant integrated with Home Assistant. \
You can help users control their smart home devices, answer questions, \
and provide assistance with various tasks. Be conversational, helpful, \
and concise in your responses. If asked about specific Home Assistant \
entities or devices, provide relevant information based on the context.";

/// Transcript of prior exchanges (oldest first)
///
/// Holds at most [`MAX_HISTORY_ENTRIES`] messages; older messages are
/// discarded when an exchange is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    messages: Vec<ChatMessage>,
}

impl ConversationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed user/assistant exchange
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(ChatMessage::user(user));
        self.messages.push(ChatMessage::assistant(assistant));

        if self.messages.len() > MAX_HISTORY_ENTRIES {
            let excess = self.messages.len() - MAX_HISTORY_ENTRIES;
            self.messages.drain(..excess);
        }
    }

    /// Forget every message
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The most recent `count` messages
    pub fn recent(&self, count: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    /// All retained messages
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of retained messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Assemble the prompt for the next utterance
    ///
    /// Includes up to `context_length` prior exchanges. When the result would
    /// exceed [`CONTEXT_WINDOW`] characters, all history is dropped and only
    /// the preamble and the utterance remain.
    pub fn build_prompt(&self, context_length: usize, utterance: &str) -> String {
        let current = ChatMessage::user(utterance).prompt_line();

        let lines: Vec<String> = std::iter::once(SYSTEM_PREAMBLE.to_string())
            .chain(
                self.recent(context_length.saturating_mul(2))
                    .iter()
                    .map(ChatMessage::prompt_line),
            )
            .chain(std::iter::once(current.clone()))
            .collect();
        let prompt = lines.join("\n");

        if prompt.chars().count() > CONTEXT_WINDOW {
            return format!("{SYSTEM_PREAMBLE}\n{current}");
        }
        prompt
    }
}
