use crate::chat::ChatMessage;
use crate::highlights::Annotation;
use std::path::PathBuf;

mod chat;
mod core;
mod reader;
mod timers;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    SaveConfig,
    LoadDocument {
        path: PathBuf,
        request_id: u64,
    },
    SaveHighlights {
        uid: String,
        snapshot: Vec<Annotation>,
        generation: u64,
    },
    SendChat {
        chat_id: String,
        request_id: u64,
        messages: Vec<ChatMessage>,
        needs_title: bool,
    },
    PersistChat {
        chat_id: String,
        messages: Vec<ChatMessage>,
        title: Option<String>,
    },
    RemoveChat(String),
    Quit,
}
