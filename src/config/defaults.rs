pub(crate) fn default_font_size() -> u32 {
    16
}

pub(crate) fn default_window_width() -> f32 {
    1024.0
}

pub(crate) fn default_window_height() -> f32 {
    768.0
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_data_dir() -> String {
    "data".to_string()
}

pub(crate) fn default_chat_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

pub(crate) fn default_chat_max_tokens() -> u32 {
    1024
}

pub(crate) fn default_chat_system_prompt() -> String {
    "You are a friendly study buddy. Answer concisely and clearly.".to_string()
}

pub(crate) fn default_key_undo() -> String {
    "ctrl+z".to_string()
}

pub(crate) fn default_key_redo() -> String {
    "ctrl+y".to_string()
}

pub(crate) fn default_key_clear_highlights() -> String {
    "ctrl+x".to_string()
}

pub(crate) fn default_key_next_page() -> String {
    "right".to_string()
}

pub(crate) fn default_key_prev_page() -> String {
    "left".to_string()
}

pub(crate) fn default_key_zoom_in() -> String {
    "ctrl+=".to_string()
}

pub(crate) fn default_key_zoom_out() -> String {
    "ctrl+-".to_string()
}

pub(crate) fn default_key_rotate_cw() -> String {
    "ctrl+]".to_string()
}

pub(crate) fn default_key_rotate_ccw() -> String {
    "ctrl+[".to_string()
}
