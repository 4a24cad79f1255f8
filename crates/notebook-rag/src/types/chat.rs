//! Chat request types

use serde::{Deserialize, Serialize};

/// Request body for the blocking chat endpoint.
///
/// The chat history is accepted for forward compatibility but only the
/// latest user message participates in retrieval and prompting; earlier
/// messages are ignored by design.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Conversation so far; the latest user message is the question
    pub messages: Vec<ChatMessage>,
    /// Notebook to answer from
    pub notebook_id: String,
}

impl ChatRequest {
    /// The question to answer: the most recent user message.
    pub fn latest_user_message(&self) -> Option<String> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_text())
    }
}

/// Request body for the streaming chat endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStreamRequest {
    /// The question to answer
    pub message: String,
    /// Notebook to answer from
    pub notebook_id: String,
}

/// One message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role ("user", "assistant", "system")
    pub role: String,
    /// Message content, either a plain string or structured parts
    pub content: MessageContent,
}

/// Message content. Web clients send content as a list of typed parts;
/// plain strings are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Structured content parts
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Flatten the content to plain text.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A typed content part within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPart {
    /// Part type (e.g. "text")
    #[serde(rename = "type")]
    pub kind: String,
    /// Text payload
    pub text: String,
}
