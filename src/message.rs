use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One turn in a conversation transcript.
///
/// Stored transcripts arrive as loosely shaped JSON rows; [`Message`] is the
/// cleaned form carrying exactly the fields a model request needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a message with an arbitrary role tag.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// A `user` turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// An `assistant` turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// A `system` turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Parse a raw transcript row, keeping only well-formed turns.
    ///
    /// A row qualifies when `role` and `content` are both non-empty strings.
    /// Anything else yields `None`, and extra fields on the row are dropped.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let role = entry.get("role")?.as_str()?;
        let content = entry.get("content")?.as_str()?;

        if role.is_empty() || content.is_empty() {
            return None;
        }

        Some(Self::new(role, content))
    }

    /// Content length in Unicode code points, the unit of history budgets.
    pub fn chars(&self) -> usize {
        self.content.chars().count()
    }
}
