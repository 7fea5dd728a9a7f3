//! Bounded conversation recall for LLM agents.
//!
//! This crate turns a raw stored transcript into a budgeted, order-preserving
//! window of [`Message`]s via [`HistoryWindow`], accumulates turns in a
//! [`Conversation`], and shapes the result toward a chat completion call
//! through [`ChatClient`] and [`chat_payload`].

mod conversation;
mod limits;
mod llm;
mod message;
mod window;

pub use conversation::Conversation;
pub use limits::clamp_token_limits;
pub use llm::{chat_payload, ChatClient, ChatError, DummyClient, GenerationOptions};
pub use message::Message;
pub use window::HistoryWindow;
