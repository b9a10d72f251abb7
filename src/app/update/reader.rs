use super::super::state::App;
use super::Effect;
use crate::bridge::{DocumentKind, LoadedDocument};
use crate::highlights::{Annotation, HighlightHistory, Mode, annotation_for_selection};
use crate::navigator::{FONT_SIZE_STEP, MAX_FONT_SIZE, MIN_FONT_SIZE};
use std::path::PathBuf;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_open_path_input_changed(&mut self, path: String) {
        self.reader.open_path_input = path;
    }

    pub(super) fn handle_open_path_requested(&mut self, effects: &mut Vec<Effect>) {
        if self.reader.loading {
            return;
        }
        let candidate = PathBuf::from(self.reader.open_path_input.trim());
        if candidate.as_os_str().is_empty() {
            return;
        }
        if !candidate.exists() {
            self.reader.load_error = Some(format!("File not found: {}", candidate.display()));
            return;
        }
        // Flush the current session before the load task reads the
        // highlight file, or a reopen of the same document would be
        // seeded from a stale snapshot.
        self.flush_session_save(effects);
        self.reader.loading = true;
        self.reader.load_error = None;
        self.reader.load_request_id += 1;
        info!(path = %candidate.display(), "Opening document");
        effects.push(Effect::LoadDocument {
            path: candidate,
            request_id: self.reader.load_request_id,
        });
    }

    pub(super) fn handle_document_loaded(
        &mut self,
        request_id: u64,
        document: LoadedDocument,
        annotations: Vec<Annotation>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.reader.load_request_id {
            debug!(request_id, "Ignoring stale document load");
            return;
        }
        // A still-open session flushes its highlights before being replaced.
        self.flush_session_save(effects);
        let history = HighlightHistory::from_saved(annotations);
        info!(uid = %document.uid, title = %document.title, "Document ready");
        self.apply_loaded_document(document, history);
    }

    pub(super) fn handle_document_load_failed(
        &mut self,
        request_id: u64,
        path: PathBuf,
        error: String,
    ) {
        if request_id != self.reader.load_request_id {
            debug!(request_id, "Ignoring stale document load failure");
            return;
        }
        self.reader.loading = false;
        self.reader.load_error = Some(format!("Failed to open {}: {}", path.display(), error));
        warn!(path = %path.display(), "Failed to open document: {error}");
    }

    pub(super) fn handle_close_document(&mut self, effects: &mut Vec<Effect>) {
        self.flush_session_save(effects);
        self.reader.session = None;
    }

    /// Hand the session's pending save descriptor to the bridge, if any.
    fn flush_session_save(&mut self, effects: &mut Vec<Effect>) {
        if let Some(session) = self.reader.session.as_mut() {
            if let Some(descriptor) = session.take_pending_save() {
                effects.push(Effect::SaveHighlights {
                    uid: descriptor.uid,
                    snapshot: descriptor.snapshot,
                    generation: descriptor.generation,
                });
            }
        }
    }

    pub(super) fn handle_mode_selected(&mut self, mode: Mode) {
        if let Some(session) = self.reader.session.as_mut() {
            session.mode = mode;
            session.selection = None;
        }
    }

    pub(super) fn handle_span_clicked(&mut self, range_key: String) {
        let Some(session) = self.reader.session.as_mut() else {
            return;
        };
        match session.mode {
            Mode::Select => {
                session.selection = Some(range_key);
            }
            Mode::Highlight(_) => {
                session.selection = Some(range_key);
                if let Some(annotation) =
                    annotation_for_selection(session.mode, session.selection.as_deref())
                {
                    if session.history.add(annotation) {
                        session.selection = None;
                        session.refresh_save_descriptor();
                    }
                }
            }
            Mode::Erase => {
                if let Some(existing) = session.history.find(&range_key).cloned() {
                    if session.history.remove(existing) {
                        session.refresh_save_descriptor();
                    }
                }
            }
        }
    }

    pub(super) fn handle_marker_clicked(&mut self, annotation: Annotation) {
        let Some(session) = self.reader.session.as_mut() else {
            return;
        };
        if session.mode == Mode::Erase {
            if session.history.remove(annotation) {
                session.refresh_save_descriptor();
            }
        }
    }

    pub(super) fn handle_undo(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            if session.history.undo() {
                session.refresh_save_descriptor();
            }
        }
    }

    pub(super) fn handle_redo(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            if session.history.redo() {
                session.refresh_save_descriptor();
            }
        }
    }

    pub(super) fn handle_request_clear_highlights(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            if !session.history.is_empty() {
                session.confirm_clear = true;
            }
        }
    }

    pub(super) fn handle_confirm_clear_highlights(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            session.confirm_clear = false;
            if session.history.clear_all() {
                session.refresh_save_descriptor();
            }
        }
    }

    pub(super) fn handle_cancel_clear_highlights(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            session.confirm_clear = false;
        }
    }

    pub(super) fn handle_page_count_reported(&mut self, count: usize) {
        if let Some(session) = self.reader.session.as_mut() {
            session.navigator.set_page_count(count);
        }
    }

    pub(super) fn handle_page_input_changed(&mut self, value: String) {
        if let Some(session) = self.reader.session.as_mut() {
            session.page_input = value;
        }
    }

    pub(super) fn handle_page_jump_requested(&mut self) {
        let Some(session) = self.reader.session.as_mut() else {
            return;
        };
        // The input is 1-based like the page label.
        if let Ok(page) = session.page_input.trim().parse::<usize>() {
            if page > 0 {
                session.navigator.go_to(page - 1);
            }
        }
        session.page_input.clear();
    }

    pub(super) fn handle_next_page(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            session.navigator.next_page();
        }
    }

    pub(super) fn handle_previous_page(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            session.navigator.prev_page();
        }
    }

    pub(super) fn handle_zoom_in(&mut self, effects: &mut Vec<Effect>) {
        let Some(session) = self.reader.session.as_mut() else {
            return;
        };
        match session.document.kind {
            DocumentKind::Epub => {
                let size = (self.config.font_size + FONT_SIZE_STEP).min(MAX_FONT_SIZE);
                if size != self.config.font_size {
                    self.config.font_size = size;
                    effects.push(Effect::SaveConfig);
                }
            }
            DocumentKind::Pdf => session.navigator.zoom_in(),
        }
    }

    pub(super) fn handle_zoom_out(&mut self, effects: &mut Vec<Effect>) {
        let Some(session) = self.reader.session.as_mut() else {
            return;
        };
        match session.document.kind {
            DocumentKind::Epub => {
                let size = self
                    .config
                    .font_size
                    .saturating_sub(FONT_SIZE_STEP)
                    .max(MIN_FONT_SIZE);
                if size != self.config.font_size {
                    self.config.font_size = size;
                    effects.push(Effect::SaveConfig);
                }
            }
            DocumentKind::Pdf => session.navigator.zoom_out(),
        }
    }

    pub(super) fn handle_rotate_clockwise(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            if session.document.kind == DocumentKind::Pdf {
                session.navigator.rotate_cw();
            }
        }
    }

    pub(super) fn handle_rotate_counter_clockwise(&mut self) {
        if let Some(session) = self.reader.session.as_mut() {
            if session.document.kind == DocumentKind::Pdf {
                session.navigator.rotate_ccw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::Message;
    use crate::bridge::{DocumentKind, Location};
    use crate::config::AppConfig;
    use crate::highlights::{Mode, PaletteColor};
    use std::fs;

    fn loaded(uid: &str) -> LoadedDocument {
        LoadedDocument {
            uid: uid.to_string(),
            title: "Doc".to_string(),
            kind: DocumentKind::Epub,
            locations: vec![Location {
                paragraphs: vec!["alpha".to_string(), "beta".to_string()],
            }],
        }
    }

    fn app_with_open_document(uid: &str) -> crate::app::App {
        let mut config = AppConfig::default();
        config.data_dir = std::env::temp_dir()
            .join(format!("studyhub-reader-{}", std::process::id()))
            .to_string_lossy()
            .to_string();
        let (mut app, _task) = crate::app::App::bootstrap(config);
        app.reduce(Message::DocumentLoaded {
            request_id: 0,
            document: loaded(uid),
            annotations: Vec::new(),
        });
        app
    }

    #[test]
    fn reopening_a_dirty_document_flushes_before_loading() {
        let mut app = app_with_open_document("doc-1");
        app.reduce(Message::ModeSelected(Mode::Highlight(PaletteColor::Green)));
        app.reduce(Message::SpanClicked("loc0-p0".to_string()));

        let reopen_path = std::env::temp_dir().join(format!(
            "studyhub-reopen-{}.epub",
            std::process::id()
        ));
        fs::write(&reopen_path, b"").unwrap();
        app.reduce(Message::OpenPathInputChanged(
            reopen_path.to_string_lossy().to_string(),
        ));
        let effects = app.reduce(Message::OpenPathRequested);

        // The dirty snapshot must be handed to the bridge before the
        // load is dispatched.
        match (&effects[0], &effects[1]) {
            (
                Effect::SaveHighlights {
                    uid,
                    snapshot,
                    generation,
                },
                Effect::LoadDocument { .. },
            ) => {
                assert_eq!(uid, "doc-1");
                assert_eq!(snapshot.len(), 1);
                assert_eq!(*generation, 1);
            }
            _ => panic!("expected a flush followed by a load"),
        }

        let _ = fs::remove_file(reopen_path);
    }

    #[test]
    fn clean_sessions_reopen_without_a_flush() {
        let mut app = app_with_open_document("doc-2");
        let effects = app.reduce(Message::CloseDocument);
        assert!(effects.is_empty(), "nothing to flush without mutations");
    }
}
