use crate::bridge::LoadedDocument;
use crate::highlights::{Annotation, HighlightHistory, Mode};
use crate::navigator::PageNavigator;
use std::collections::HashMap;

/// Reader-related model. `session` is `None` until a document is open.
/// `flushed` remembers, per document uid, the newest snapshot generation
/// already handed to the bridge, so an older snapshot can never
/// overwrite a newer one.
pub struct ReaderState {
    pub(in crate::app) open_path_input: String,
    pub(in crate::app) loading: bool,
    pub(in crate::app) load_error: Option<String>,
    pub(in crate::app) load_request_id: u64,
    pub(in crate::app) session: Option<ReaderSession>,
    flushed: HashMap<String, u64>,
}

impl ReaderState {
    pub(in crate::app) fn new() -> Self {
        ReaderState {
            open_path_input: String::new(),
            loading: false,
            load_error: None,
            load_request_id: 0,
            session: None,
            flushed: HashMap::new(),
        }
    }

    /// Newest generation already flushed for this uid; 0 if none.
    pub(in crate::app) fn flushed_generation(&self, uid: &str) -> u64 {
        self.flushed.get(uid).copied().unwrap_or(0)
    }

    /// Record a flush. Returns `false` when a snapshot at least this new
    /// was already flushed for the uid, in which case the caller must
    /// skip the write.
    pub(in crate::app) fn record_flush(&mut self, uid: &str, generation: u64) -> bool {
        match self.flushed.get(uid) {
            Some(&newest) if generation <= newest => false,
            _ => {
                self.flushed.insert(uid.to_string(), generation);
                true
            }
        }
    }
}

/// Everything tied to the currently open document.
pub struct ReaderSession {
    pub(in crate::app) document: LoadedDocument,
    pub(in crate::app) history: HighlightHistory,
    pub(in crate::app) navigator: PageNavigator,
    pub(in crate::app) mode: Mode,
    pub(in crate::app) selection: Option<String>,
    pub(in crate::app) confirm_clear: bool,
    pub(in crate::app) page_input: String,
    pub(in crate::app) save_generation: u64,
    pub(in crate::app) pending_save: Option<SaveDescriptor>,
}

/// The write the bridge should perform when the document closes. The
/// generation counter, checked against the per-uid flush ledger, lets
/// an older snapshot be skipped once a newer one has been flushed.
#[derive(Debug, Clone)]
pub struct SaveDescriptor {
    pub(in crate::app) uid: String,
    pub(in crate::app) snapshot: Vec<Annotation>,
    pub(in crate::app) generation: u64,
}

impl ReaderSession {
    /// `save_generation` resumes from the uid's last flushed generation
    /// so descriptors stay monotonic across close-and-reopen.
    pub(in crate::app) fn new(
        document: LoadedDocument,
        history: HighlightHistory,
        save_generation: u64,
    ) -> Self {
        let mut navigator = PageNavigator::new();
        if let Some(count) = document.page_count() {
            navigator.set_page_count(count);
        }
        ReaderSession {
            document,
            history,
            navigator,
            mode: Mode::default(),
            selection: None,
            confirm_clear: false,
            page_input: String::new(),
            save_generation,
            pending_save: None,
        }
    }

    /// Rebuild the save descriptor from the live list after a mutation.
    pub(in crate::app) fn refresh_save_descriptor(&mut self) {
        self.save_generation += 1;
        self.pending_save = Some(SaveDescriptor {
            uid: self.document.uid.clone(),
            snapshot: self.history.snapshot().to_vec(),
            generation: self.save_generation,
        });
    }

    pub(in crate::app) fn take_pending_save(&mut self) -> Option<SaveDescriptor> {
        self.pending_save.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{DocumentKind, Location};

    fn doc(uid: &str) -> LoadedDocument {
        LoadedDocument {
            uid: uid.to_string(),
            title: "Doc".to_string(),
            kind: DocumentKind::Epub,
            locations: vec![Location {
                paragraphs: vec!["text".to_string()],
            }],
        }
    }

    #[test]
    fn flush_ledger_rejects_stale_generations() {
        let mut reader = ReaderState::new();
        assert!(reader.record_flush("doc", 1));
        assert!(reader.record_flush("doc", 2));
        assert!(!reader.record_flush("doc", 2));
        assert!(!reader.record_flush("doc", 1));
        assert!(reader.record_flush("other", 1));
    }

    #[test]
    fn reopened_sessions_resume_the_flushed_generation() {
        let mut reader = ReaderState::new();
        assert!(reader.record_flush("doc-1", 3));

        let mut session = ReaderSession::new(
            doc("doc-1"),
            HighlightHistory::new(),
            reader.flushed_generation("doc-1"),
        );
        session.refresh_save_descriptor();
        let descriptor = session.take_pending_save().unwrap();
        assert_eq!(descriptor.generation, 4);
        assert!(reader.record_flush(&descriptor.uid, descriptor.generation));
    }
}
