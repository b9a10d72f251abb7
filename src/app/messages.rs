use crate::bridge::LoadedDocument;
use crate::chat::ChatMessage;
use crate::highlights::{Annotation, Mode};
use iced::keyboard::{Key, Modifiers};
use std::path::PathBuf;
use std::time::Instant;

/// The tool panes behind the tab switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Timers,
    Reader,
    Chat,
}

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    SwitchTool(Tool),
    ToggleTheme,
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Tick(Instant),
    Quit,

    OpenPathInputChanged(String),
    OpenPathRequested,
    DocumentLoaded {
        request_id: u64,
        document: LoadedDocument,
        annotations: Vec<Annotation>,
    },
    DocumentLoadFailed {
        request_id: u64,
        path: PathBuf,
        error: String,
    },
    CloseDocument,
    ModeSelected(Mode),
    SpanClicked(String),
    MarkerClicked(Annotation),
    Undo,
    Redo,
    RequestClearHighlights,
    ConfirmClearHighlights,
    CancelClearHighlights,
    PageCountReported(usize),
    PageInputChanged(String),
    PageJumpRequested,
    NextPage,
    PreviousPage,
    ZoomIn,
    ZoomOut,
    RotateClockwise,
    RotateCounterClockwise,

    TimerNameChanged(String),
    TimerDigitIncremented(usize),
    TimerDigitDecremented(usize),
    CreateTimer,
    StartTimer(u8),
    TogglePauseTimer(u8),
    ResetTimer(u8),
    RemoveTimer(u8),
    DismissTimerNotice,

    ChatInputChanged(String),
    SendChatMessage,
    AssistantReplied {
        chat_id: String,
        request_id: u64,
        reply: ChatMessage,
        model: String,
        title: Option<String>,
    },
    AssistantFailed {
        chat_id: String,
        request_id: u64,
        error: String,
    },
    StartNewChat,
    OpenChat(String),
    DeleteChat(String),
}
