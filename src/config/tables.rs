use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    chat: ChatConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            window_width: tables.window.width,
            window_height: tables.window.height,
            log_level: tables.logging.log_level,
            data_dir: tables.storage.data_dir,
            chat_endpoint: tables.chat.endpoint,
            chat_max_tokens: tables.chat.max_tokens,
            chat_system_prompt: tables.chat.system_prompt,
            key_undo: tables.keys.undo,
            key_redo: tables.keys.redo,
            key_clear_highlights: tables.keys.clear_highlights,
            key_next_page: tables.keys.next_page,
            key_prev_page: tables.keys.prev_page,
            key_zoom_in: tables.keys.zoom_in,
            key_zoom_out: tables.keys.zoom_out,
            key_rotate_cw: tables.keys.rotate_cw,
            key_rotate_ccw: tables.keys.rotate_ccw,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
            },
            window: WindowConfig {
                width: config.window_width,
                height: config.window_height,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            storage: StorageConfig {
                data_dir: config.data_dir.clone(),
            },
            chat: ChatConfig {
                endpoint: config.chat_endpoint.clone(),
                max_tokens: config.chat_max_tokens,
                system_prompt: config.chat_system_prompt.clone(),
            },
            keys: KeysConfig {
                undo: config.key_undo.clone(),
                redo: config.key_redo.clone(),
                clear_highlights: config.key_clear_highlights.clone(),
                next_page: config.key_next_page.clone(),
                prev_page: config.key_prev_page.clone(),
                zoom_in: config.key_zoom_in.clone(),
                zoom_out: config.key_zoom_out.clone(),
                rotate_cw: config.key_rotate_cw.clone(),
                rotate_ccw: config.key_rotate_ccw.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    width: f32,
    #[serde(default = "defaults::default_window_height")]
    height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct StorageConfig {
    #[serde(default = "defaults::default_data_dir")]
    data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: defaults::default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ChatConfig {
    #[serde(default = "defaults::default_chat_endpoint")]
    endpoint: String,
    #[serde(default = "defaults::default_chat_max_tokens")]
    max_tokens: u32,
    #[serde(default = "defaults::default_chat_system_prompt")]
    system_prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            endpoint: defaults::default_chat_endpoint(),
            max_tokens: defaults::default_chat_max_tokens(),
            system_prompt: defaults::default_chat_system_prompt(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_undo")]
    undo: String,
    #[serde(default = "defaults::default_key_redo")]
    redo: String,
    #[serde(default = "defaults::default_key_clear_highlights")]
    clear_highlights: String,
    #[serde(default = "defaults::default_key_next_page")]
    next_page: String,
    #[serde(default = "defaults::default_key_prev_page")]
    prev_page: String,
    #[serde(default = "defaults::default_key_zoom_in")]
    zoom_in: String,
    #[serde(default = "defaults::default_key_zoom_out")]
    zoom_out: String,
    #[serde(default = "defaults::default_key_rotate_cw")]
    rotate_cw: String,
    #[serde(default = "defaults::default_key_rotate_ccw")]
    rotate_ccw: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            undo: defaults::default_key_undo(),
            redo: defaults::default_key_redo(),
            clear_highlights: defaults::default_key_clear_highlights(),
            next_page: defaults::default_key_next_page(),
            prev_page: defaults::default_key_prev_page(),
            zoom_in: defaults::default_key_zoom_in(),
            zoom_out: defaults::default_key_zoom_out(),
            rotate_cw: defaults::default_key_rotate_cw(),
            rotate_ccw: defaults::default_key_rotate_ccw(),
        }
    }
}
