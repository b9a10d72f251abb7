use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use std::time::Instant;
use tracing::info;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::SwitchTool(tool) => self.handle_switch_tool(tool),
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Tick(now) => self.handle_tick(now, &mut effects),
            Message::Quit => effects.push(Effect::Quit),

            Message::OpenPathInputChanged(path) => self.handle_open_path_input_changed(path),
            Message::OpenPathRequested => self.handle_open_path_requested(&mut effects),
            Message::DocumentLoaded {
                request_id,
                document,
                annotations,
            } => self.handle_document_loaded(request_id, document, annotations, &mut effects),
            Message::DocumentLoadFailed {
                request_id,
                path,
                error,
            } => self.handle_document_load_failed(request_id, path, error),
            Message::CloseDocument => self.handle_close_document(&mut effects),
            Message::ModeSelected(mode) => self.handle_mode_selected(mode),
            Message::SpanClicked(range_key) => self.handle_span_clicked(range_key),
            Message::MarkerClicked(annotation) => self.handle_marker_clicked(annotation),
            Message::Undo => self.handle_undo(),
            Message::Redo => self.handle_redo(),
            Message::RequestClearHighlights => self.handle_request_clear_highlights(),
            Message::ConfirmClearHighlights => self.handle_confirm_clear_highlights(),
            Message::CancelClearHighlights => self.handle_cancel_clear_highlights(),
            Message::PageCountReported(count) => self.handle_page_count_reported(count),
            Message::PageInputChanged(value) => self.handle_page_input_changed(value),
            Message::PageJumpRequested => self.handle_page_jump_requested(),
            Message::NextPage => self.handle_next_page(),
            Message::PreviousPage => self.handle_previous_page(),
            Message::ZoomIn => self.handle_zoom_in(&mut effects),
            Message::ZoomOut => self.handle_zoom_out(&mut effects),
            Message::RotateClockwise => self.handle_rotate_clockwise(),
            Message::RotateCounterClockwise => self.handle_rotate_counter_clockwise(),

            Message::TimerNameChanged(name) => self.handle_timer_name_changed(name),
            Message::TimerDigitIncremented(index) => self.handle_timer_digit_incremented(index),
            Message::TimerDigitDecremented(index) => self.handle_timer_digit_decremented(index),
            Message::CreateTimer => self.handle_create_timer(),
            Message::StartTimer(id) => self.handle_start_timer(id),
            Message::TogglePauseTimer(id) => self.handle_toggle_pause_timer(id),
            Message::ResetTimer(id) => self.handle_reset_timer(id),
            Message::RemoveTimer(id) => self.handle_remove_timer(id),
            Message::DismissTimerNotice => self.handle_dismiss_timer_notice(),

            Message::ChatInputChanged(input) => self.handle_chat_input_changed(input),
            Message::SendChatMessage => self.handle_send_chat_message(&mut effects),
            Message::AssistantReplied {
                chat_id,
                request_id,
                reply,
                model,
                title,
            } => self.handle_assistant_replied(
                chat_id, request_id, reply, model, title, &mut effects,
            ),
            Message::AssistantFailed {
                chat_id,
                request_id,
                error,
            } => self.handle_assistant_failed(chat_id, request_id, error),
            Message::StartNewChat => self.handle_start_new_chat(),
            Message::OpenChat(chat_id) => self.handle_open_chat(chat_id),
            Message::DeleteChat(chat_id) => self.handle_delete_chat(chat_id, &mut effects),
        }

        effects
    }

    fn handle_switch_tool(&mut self, tool: super::super::super::messages::Tool) {
        if self.active_tool != tool {
            info!(?tool, "Switching tool");
            self.active_tool = tool;
        }
    }

    fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.config.theme = match self.config.theme {
            crate::config::ThemeMode::Day => crate::config::ThemeMode::Night,
            crate::config::ThemeMode::Night => crate::config::ThemeMode::Day,
        };
        effects.push(Effect::SaveConfig);
    }

    fn handle_window_resized(&mut self, width: f32, height: f32, effects: &mut Vec<Effect>) {
        if width.is_finite() && height.is_finite() {
            self.config.window_width = width;
            self.config.window_height = height;
            effects.push(Effect::SaveConfig);
        }
    }

    fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            effects.push(Effect::Quit);
            return;
        }
        self.timers.last_tick = now;
        let expired = self.timers.bank.tick(now);
        for id in expired {
            let name = self
                .timers
                .bank
                .timers()
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| format!("Timer {id}"));
            info!(id, name, "Timer expired");
            self.timers.notice = Some(format!("{name} is up!"));
        }
    }
}
