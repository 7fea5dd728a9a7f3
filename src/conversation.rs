use serde_json::{json, Value};

use crate::message::Message;
use crate::window::HistoryWindow;

/// Ordered transcript of a conversation, oldest turn first.
///
/// The log is append-only and never trimmed; [`recall`](Conversation::recall)
/// exposes a budgeted view for prompt assembly.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    entries: Vec<Value>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a log from stored transcript rows, as-is.
    pub fn from_entries(entries: Vec<Value>) -> Self {
        Self { entries }
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Message::user(content));
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Message::assistant(content));
    }

    /// Append a system turn.
    pub fn push_system(&mut self, content: impl Into<String>) {
        self.push(Message::system(content));
    }

    /// Append a typed message.
    pub fn push(&mut self, message: Message) {
        self.entries
            .push(json!({"role": message.role, "content": message.content}));
    }

    /// Append a raw transcript row without validation. Ineligible rows are
    /// skipped at recall time.
    pub fn push_raw(&mut self, entry: Value) {
        self.entries.push(entry);
    }

    /// All raw rows, oldest first.
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Budgeted view of the most recent turns.
    pub fn recall(&self, window: &HistoryWindow) -> Vec<Message> {
        window.select(&self.entries)
    }
}
