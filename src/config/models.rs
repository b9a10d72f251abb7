use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_data_dir")]
    pub data_dir: String,
    #[serde(default = "crate::config::defaults::default_chat_endpoint")]
    pub chat_endpoint: String,
    #[serde(default = "crate::config::defaults::default_chat_max_tokens")]
    pub chat_max_tokens: u32,
    #[serde(default = "crate::config::defaults::default_chat_system_prompt")]
    pub chat_system_prompt: String,
    #[serde(default = "crate::config::defaults::default_key_undo")]
    pub key_undo: String,
    #[serde(default = "crate::config::defaults::default_key_redo")]
    pub key_redo: String,
    #[serde(default = "crate::config::defaults::default_key_clear_highlights")]
    pub key_clear_highlights: String,
    #[serde(default = "crate::config::defaults::default_key_next_page")]
    pub key_next_page: String,
    #[serde(default = "crate::config::defaults::default_key_prev_page")]
    pub key_prev_page: String,
    #[serde(default = "crate::config::defaults::default_key_zoom_in")]
    pub key_zoom_in: String,
    #[serde(default = "crate::config::defaults::default_key_zoom_out")]
    pub key_zoom_out: String,
    #[serde(default = "crate::config::defaults::default_key_rotate_cw")]
    pub key_rotate_cw: String,
    #[serde(default = "crate::config::defaults::default_key_rotate_ccw")]
    pub key_rotate_ccw: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            font_size: crate::config::defaults::default_font_size(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            log_level: crate::config::defaults::default_log_level(),
            data_dir: crate::config::defaults::default_data_dir(),
            chat_endpoint: crate::config::defaults::default_chat_endpoint(),
            chat_max_tokens: crate::config::defaults::default_chat_max_tokens(),
            chat_system_prompt: crate::config::defaults::default_chat_system_prompt(),
            key_undo: crate::config::defaults::default_key_undo(),
            key_redo: crate::config::defaults::default_key_redo(),
            key_clear_highlights: crate::config::defaults::default_key_clear_highlights(),
            key_next_page: crate::config::defaults::default_key_next_page(),
            key_prev_page: crate::config::defaults::default_key_prev_page(),
            key_zoom_in: crate::config::defaults::default_key_zoom_in(),
            key_zoom_out: crate::config::defaults::default_key_zoom_out(),
            key_rotate_cw: crate::config::defaults::default_key_rotate_cw(),
            key_rotate_ccw: crate::config::defaults::default_key_rotate_ccw(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Night
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
