use super::super::state::{App, ChatState};
use super::Effect;
use crate::chat::{ChatMessage, DEFAULT_TITLE, load_chat};
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_chat_input_changed(&mut self, input: String) {
        self.chat.input = input;
    }

    pub(super) fn handle_send_chat_message(&mut self, effects: &mut Vec<Effect>) {
        if self.chat.sending {
            return;
        }
        let content = self.chat.input.trim().to_string();
        if content.is_empty() {
            return;
        }
        self.chat.input.clear();
        self.chat.error = None;
        self.chat.messages.push(ChatMessage::user(content));
        self.chat.sending = true;
        self.chat.request_id += 1;
        effects.push(Effect::SendChat {
            chat_id: self.chat.chat_id.clone(),
            request_id: self.chat.request_id,
            messages: self.chat.messages.clone(),
            needs_title: self.chat.title == DEFAULT_TITLE,
        });
    }

    pub(super) fn handle_assistant_replied(
        &mut self,
        chat_id: String,
        request_id: u64,
        reply: ChatMessage,
        model: String,
        title: Option<String>,
        effects: &mut Vec<Effect>,
    ) {
        if chat_id != self.chat.chat_id || request_id != self.chat.request_id {
            debug!(chat_id, request_id, "Ignoring stale assistant reply");
            return;
        }
        info!(model, "Assistant replied");
        self.chat.sending = false;
        self.chat.messages.push(reply);
        if let Some(title) = &title {
            self.chat.title = title.clone();
            self.chat
                .index
                .insert(self.chat.chat_id.clone(), title.clone());
        }
        effects.push(Effect::PersistChat {
            chat_id: self.chat.chat_id.clone(),
            messages: self.chat.messages.clone(),
            title,
        });
    }

    pub(super) fn handle_assistant_failed(
        &mut self,
        chat_id: String,
        request_id: u64,
        error: String,
    ) {
        if chat_id != self.chat.chat_id || request_id != self.chat.request_id {
            debug!(chat_id, request_id, "Ignoring stale assistant failure");
            return;
        }
        warn!("Assistant request failed: {error}");
        self.chat.sending = false;
        self.chat.error = Some(error);
    }

    pub(super) fn handle_start_new_chat(&mut self) {
        let index = std::mem::take(&mut self.chat.index);
        self.chat = ChatState::new(&self.config.chat_system_prompt, index);
    }

    pub(super) fn handle_open_chat(&mut self, chat_id: String) {
        if chat_id == self.chat.chat_id {
            return;
        }
        let messages = load_chat(&self.storage, &chat_id, &self.config.chat_system_prompt);
        let title = self
            .chat
            .index
            .get(&chat_id)
            .cloned()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        info!(chat_id, title, "Opened saved chat");
        self.chat.chat_id = chat_id;
        self.chat.title = title;
        self.chat.messages = messages;
        self.chat.input.clear();
        self.chat.sending = false;
        self.chat.request_id += 1;
        self.chat.error = None;
    }

    pub(super) fn handle_delete_chat(&mut self, chat_id: String, effects: &mut Vec<Effect>) {
        self.chat.index.remove(&chat_id);
        if chat_id == self.chat.chat_id {
            self.handle_start_new_chat();
        }
        effects.push(Effect::RemoveChat(chat_id));
    }
}
