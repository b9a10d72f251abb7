use crate::chat::{ChatMessage, DEFAULT_TITLE, new_chat_id};
use std::collections::HashMap;

/// Chat assistant model.
pub struct ChatState {
    pub(in crate::app) chat_id: String,
    pub(in crate::app) title: String,
    pub(in crate::app) messages: Vec<ChatMessage>,
    pub(in crate::app) index: HashMap<String, String>,
    pub(in crate::app) input: String,
    pub(in crate::app) sending: bool,
    pub(in crate::app) request_id: u64,
    pub(in crate::app) error: Option<String>,
}

impl ChatState {
    pub(in crate::app) fn new(system_prompt: &str, index: HashMap<String, String>) -> Self {
        ChatState {
            chat_id: new_chat_id(),
            title: DEFAULT_TITLE.to_string(),
            messages: vec![ChatMessage::system(system_prompt)],
            index,
            input: String::new(),
            sending: false,
            request_id: 0,
            error: None,
        }
    }

    /// Saved chats, newest first. Ids are timestamp-derived so the id
    /// ordering is the creation ordering.
    pub(in crate::app) fn sorted_index(&self) -> Vec<(&String, &String)> {
        let mut entries: Vec<_> = self.index.iter().collect();
        entries.sort_by(|a, b| b.0.cmp(a.0));
        entries
    }
}
