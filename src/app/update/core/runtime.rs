use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use crate::bridge;
use crate::chat;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use std::path::Path;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                if let Err(err) =
                    crate::config::save_config(Path::new("conf/config.toml"), &self.config)
                {
                    warn!("Failed to persist config: {err:#}");
                }
                Task::none()
            }
            Effect::LoadDocument { path, request_id } => {
                let storage = self.storage.clone();
                Task::perform(
                    async move {
                        match bridge::open_document(&path) {
                            Ok(document) => {
                                let annotations =
                                    bridge::load_annotations(&storage, &document.uid);
                                Message::DocumentLoaded {
                                    request_id,
                                    document,
                                    annotations,
                                }
                            }
                            Err(err) => Message::DocumentLoadFailed {
                                request_id,
                                path,
                                error: err.to_string(),
                            },
                        }
                    },
                    |message| message,
                )
            }
            // Written inline so flushes stay ordered with the reducer:
            // a load dispatched after a flush always reads the flushed
            // file, and two flushes for one uid can never race.
            Effect::SaveHighlights {
                uid,
                snapshot,
                generation,
            } => {
                self.write_highlight_snapshot(&uid, &snapshot, generation);
                Task::none()
            }
            Effect::SendChat {
                chat_id,
                request_id,
                messages,
                needs_title,
            } => {
                let client = self.chat_client.clone();
                Task::perform(
                    async move {
                        match client.complete(&messages).await {
                            Ok((reply, model)) => {
                                let title = if needs_title {
                                    let user = messages
                                        .iter()
                                        .rev()
                                        .find(|m| m.role == "user")
                                        .map(|m| m.content.as_str())
                                        .unwrap_or_default();
                                    Some(client.generate_title(user, &reply.content).await)
                                } else {
                                    None
                                };
                                Message::AssistantReplied {
                                    chat_id,
                                    request_id,
                                    reply,
                                    model,
                                    title,
                                }
                            }
                            Err(err) => Message::AssistantFailed {
                                chat_id,
                                request_id,
                                error: err.to_string(),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::PersistChat {
                chat_id,
                messages,
                title,
            } => {
                if let Err(err) = chat::save_chat(&self.storage, &chat_id, &messages) {
                    warn!(chat_id, "Failed to persist chat: {err:#}");
                }
                if let Some(title) = title {
                    if let Err(err) = chat::set_chat_title(&self.storage, &chat_id, &title) {
                        warn!(chat_id, "Failed to persist chat title: {err:#}");
                    }
                }
                Task::none()
            }
            Effect::RemoveChat(chat_id) => {
                chat::delete_chat(&self.storage, &chat_id);
                Task::none()
            }
            Effect::Quit => {
                // Flush the save descriptor and config before the event
                // loop dies; async tasks would be dropped on exit.
                let pending = self
                    .reader
                    .session
                    .as_mut()
                    .and_then(|session| session.take_pending_save());
                if let Some(descriptor) = pending {
                    self.write_highlight_snapshot(
                        &descriptor.uid,
                        &descriptor.snapshot,
                        descriptor.generation,
                    );
                }
                if let Err(err) =
                    crate::config::save_config(Path::new("conf/config.toml"), &self.config)
                {
                    warn!("Failed to persist config on quit: {err:#}");
                }
                info!("Shutting down");
                iced::exit()
            }
        }
    }

    /// Persist one highlight snapshot, consulting the per-uid flush
    /// ledger so an older generation never overwrites a newer one.
    fn write_highlight_snapshot(
        &mut self,
        uid: &str,
        snapshot: &[crate::highlights::Annotation],
        generation: u64,
    ) {
        if !self.reader.record_flush(uid, generation) {
            debug!(uid, generation, "Skipping stale highlight snapshot");
            return;
        }
        if let Err(err) = bridge::save_annotations(&self.storage, uid, snapshot) {
            warn!(uid, generation, "Highlight save failed: {err:#}");
        } else {
            debug!(uid, generation, "Saved highlight snapshot");
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(iced::window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(iced::window::Event::CloseRequested) => Some(Message::Quit),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
