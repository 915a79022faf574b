//! Gemini API wire types
//!
//! Structs that mirror the `generateContent` JSON request/response format.

use serde::{Deserialize, Serialize};

/// Role tag used on request contents
pub const ROLE_USER: &str = "user";

/// Role tag used on model turns in the history
pub const ROLE_MODEL: &str = "model";

/// Request body for `generateContent`
#[derive(Serialize, Debug)]
pub struct GenerateRequest {
    /// Conversation turns, oldest first, ending with the new user turn
    pub contents: Vec<Content>,
    /// Fixed persona instruction applied to the whole session
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

/// One conversation turn (or the system instruction)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Content {
    /// Content parts (typically one text part)
    pub parts: Vec<Part>,
    /// "user" or "model"; absent on the system instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Content {
    /// Build a single-part turn with the given role
    pub fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
            role: Some(role.to_string()),
        }
    }

    /// Build a role-less content block (used for the system instruction)
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
            role: None,
        }
    }
}

/// A single text part
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Part {
    /// The text content of this part
    pub text: String,
}

/// Top-level `generateContent` response
#[derive(Deserialize, Debug)]
pub struct GenerateResponse {
    /// Candidate replies from the model; may be empty
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback about the prompt (e.g. if it was blocked)
    #[serde(default, alias = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// A single candidate reply
#[derive(Deserialize, Debug)]
pub struct Candidate {
    /// The content of this candidate
    pub content: Content,
}

/// Feedback about the prompt
#[derive(Deserialize, Debug)]
pub struct PromptFeedback {
    /// Reason the prompt was blocked, if it was
    #[serde(default, alias = "blockReason")]
    pub block_reason: Option<String>,
}
