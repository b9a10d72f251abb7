mod chat;
mod reader;
mod timers;

use crate::bridge::LoadedDocument;
use crate::chat::{ChatClient, load_chat_index};
use crate::config::AppConfig;
use crate::highlights::HighlightHistory;
use crate::navigator::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::storage::Storage;
use iced::Task;

use super::messages::{Message, Tool};

pub(in crate::app) use chat::ChatState;
pub(in crate::app) use reader::{ReaderSession, ReaderState, SaveDescriptor};
pub(in crate::app) use timers::TimerState;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) storage: Storage,
    pub(super) chat_client: ChatClient,
    pub(super) active_tool: Tool,
    pub(super) reader: ReaderState,
    pub(super) timers: TimerState,
    pub(super) chat: ChatState,
}

impl App {
    pub(super) fn bootstrap(mut config: AppConfig) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let storage = Storage::new(config.data_dir.clone());
        let chat_client = ChatClient::new(config.chat_endpoint.clone(), config.chat_max_tokens);
        let chat_index = load_chat_index(&storage);
        let app = App {
            chat: ChatState::new(&config.chat_system_prompt, chat_index),
            reader: ReaderState::new(),
            timers: TimerState::new(),
            active_tool: Tool::Reader,
            storage,
            chat_client,
            config,
        };
        (app, Task::none())
    }

    /// Install a freshly loaded document and its saved highlights as the
    /// active reading session.
    pub(super) fn apply_loaded_document(
        &mut self,
        document: LoadedDocument,
        history: HighlightHistory,
    ) {
        self.reader.loading = false;
        self.reader.load_error = None;
        let generation = self.reader.flushed_generation(&document.uid);
        self.reader.session = Some(ReaderSession::new(document, history, generation));
    }
}

fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: &str) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback.to_string();
        } else {
            *value = normalized;
        }
    }

    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.window_width = config.window_width.clamp(320.0, 7680.0);
    config.window_height = config.window_height.clamp(240.0, 4320.0);
    config.chat_max_tokens = config.chat_max_tokens.clamp(1, 8192);
    if config.data_dir.trim().is_empty() {
        config.data_dir = "data".to_string();
    }
    normalize_key_binding(&mut config.key_undo, "ctrl+z");
    normalize_key_binding(&mut config.key_redo, "ctrl+y");
    normalize_key_binding(&mut config.key_clear_highlights, "ctrl+x");
    normalize_key_binding(&mut config.key_next_page, "right");
    normalize_key_binding(&mut config.key_prev_page, "left");
    normalize_key_binding(&mut config.key_zoom_in, "ctrl+=");
    normalize_key_binding(&mut config.key_zoom_out, "ctrl+-");
    normalize_key_binding(&mut config.key_rotate_cw, "ctrl+]");
    normalize_key_binding(&mut config.key_rotate_ccw, "ctrl+[");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_reins_in_out_of_range_values() {
        let mut config = AppConfig::default();
        config.font_size = 99;
        config.window_width = 10.0;
        config.key_undo = "  CTRL+Z ".to_string();
        config.key_redo = String::new();
        clamp_config(&mut config);
        assert_eq!(config.font_size, MAX_FONT_SIZE);
        assert_eq!(config.window_width, 320.0);
        assert_eq!(config.key_undo, "ctrl+z");
        assert_eq!(config.key_redo, "ctrl+y");
    }

    #[test]
    fn clamp_keeps_valid_values_untouched() {
        let mut config = AppConfig::default();
        config.font_size = 14;
        clamp_config(&mut config);
        assert_eq!(config.font_size, 14);
    }
}
