//! Highlight annotations for the reader, with linear undo/redo history.
//!
//! The store owns an in-memory list of highlights plus two stacks of
//! reversible actions. Persistence is not handled here: callers take a
//! `snapshot()` and hand it to the bridge whenever the list changes.

use serde::{Deserialize, Serialize};

/// A colored highlight attached to an opaque content range.
///
/// `range_key` is supplied by the renderer and is only ever compared for
/// equality; it is the sole identity key of a highlight. Two annotations
/// with the same key are the same highlight even if their colors differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub color: String,
    pub range_key: String,
}

impl Annotation {
    pub fn new(color: impl Into<String>, range_key: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            range_key: range_key.into(),
        }
    }
}

/// The fixed highlighter palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteColor {
    Chartreuse,
    Green,
    Blue,
    Red,
    Magenta,
}

pub const PALETTE: [PaletteColor; 5] = [
    PaletteColor::Chartreuse,
    PaletteColor::Green,
    PaletteColor::Blue,
    PaletteColor::Red,
    PaletteColor::Magenta,
];

impl PaletteColor {
    /// The color string stored in annotations and in persisted snapshots.
    pub fn css(self) -> &'static str {
        match self {
            PaletteColor::Chartreuse => "#9dff00",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Red => "red",
            PaletteColor::Magenta => "magenta",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaletteColor::Chartreuse => "Chartreuse",
            PaletteColor::Green => "Green",
            PaletteColor::Blue => "Blue",
            PaletteColor::Red => "Red",
            PaletteColor::Magenta => "Magenta",
        }
    }
}

/// How selection events in the reader are interpreted.
///
/// Exactly one mode is active at a time (radio-button semantics).
/// Switching modes never touches the highlight history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plain text selection; selection events produce no mutation.
    Select,
    /// Selections become highlights of the given color.
    Highlight(PaletteColor),
    /// Clicking an existing marker removes it.
    Erase,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Select
    }
}

/// Maps a selection event to the highlight it should create, if any.
///
/// Only highlight mode with a non-empty range key produces a request;
/// select mode ignores selections and erase mode is driven by marker
/// clicks, not selections.
pub fn annotation_for_selection(mode: Mode, range_key: Option<&str>) -> Option<Annotation> {
    match mode {
        Mode::Highlight(color) => {
            let key = range_key?.trim();
            if key.is_empty() {
                return None;
            }
            Some(Annotation::new(color.css(), key))
        }
        Mode::Select | Mode::Erase => None,
    }
}

/// One reversible mutation of the live highlight list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    Add(Annotation),
    Remove(Annotation),
    /// Snapshot of the whole list taken just before it was cleared.
    Clear(Vec<Annotation>),
}

/// The undo/redo-capable holder of the live highlight list.
///
/// All operations are total: duplicate adds, removals of absent keys, and
/// undo/redo on empty stacks degrade to no-ops rather than errors. The UI
/// leans on this to stay robust against double-clicks and stale references.
#[derive(Debug, Default)]
pub struct HighlightHistory {
    live: Vec<Annotation>,
    undo_stack: Vec<HistoryAction>,
    redo_stack: Vec<HistoryAction>,
}

impl HighlightHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a persisted snapshot. History starts empty, so
    /// the restored highlights cannot be undone. Entries sharing a range
    /// key with an earlier entry are dropped here to restore the
    /// uniqueness invariant over data we did not write ourselves.
    pub fn from_saved(saved: Vec<Annotation>) -> Self {
        let mut live: Vec<Annotation> = Vec::with_capacity(saved.len());
        for annotation in saved {
            if !live.iter().any(|a| a.range_key == annotation.range_key) {
                live.push(annotation);
            }
        }
        Self {
            live,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Insert a highlight. Returns `true` if the list changed.
    ///
    /// Adding a range key that is already present is a no-op: nothing is
    /// stored and no history entry is pushed.
    pub fn add(&mut self, annotation: Annotation) -> bool {
        if self
            .live
            .iter()
            .any(|a| a.range_key == annotation.range_key)
        {
            return false;
        }
        self.live.push(annotation.clone());
        self.undo_stack.push(HistoryAction::Add(annotation));
        self.redo_stack.clear();
        true
    }

    /// Remove the highlight with this annotation's range key. Returns
    /// `true` if the list changed; removing an absent key is a no-op.
    pub fn remove(&mut self, annotation: Annotation) -> bool {
        let before = self.live.len();
        self.live.retain(|a| a.range_key != annotation.range_key);
        if self.live.len() == before {
            return false;
        }
        self.undo_stack.push(HistoryAction::Remove(annotation));
        self.redo_stack.clear();
        true
    }

    /// Clear every highlight, remembering the full list so the clear can
    /// be undone. No-op when already empty.
    ///
    /// Callers must gate this behind a user confirmation; the store
    /// itself asks no questions.
    pub fn clear_all(&mut self) -> bool {
        if self.live.is_empty() {
            return false;
        }
        let cleared = std::mem::take(&mut self.live);
        self.undo_stack.push(HistoryAction::Clear(cleared));
        self.redo_stack.clear();
        true
    }

    /// Revert the most recent action. Returns `true` if anything changed.
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        match &action {
            HistoryAction::Add(annotation) => {
                self.live.retain(|a| a.range_key != annotation.range_key);
            }
            HistoryAction::Remove(annotation) => {
                self.live.push(annotation.clone());
            }
            HistoryAction::Clear(snapshot) => {
                self.live = snapshot.clone();
            }
        }
        self.redo_stack.push(action);
        true
    }

    /// Re-apply the most recently undone action. Returns `true` if
    /// anything changed.
    pub fn redo(&mut self) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        match &action {
            HistoryAction::Add(annotation) => {
                self.live.push(annotation.clone());
            }
            HistoryAction::Remove(annotation) => {
                self.live.retain(|a| a.range_key != annotation.range_key);
            }
            HistoryAction::Clear(_) => {
                self.live.clear();
            }
        }
        self.undo_stack.push(action);
        true
    }

    /// The current live list. Reflects only completed mutations.
    pub fn snapshot(&self) -> &[Annotation] {
        &self.live
    }

    pub fn find(&self, range_key: &str) -> Option<&Annotation> {
        self.live.iter().find(|a| a.range_key == range_key)
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(color: &str, key: &str) -> Annotation {
        Annotation::new(color, key)
    }

    #[test]
    fn add_then_undo_then_redo_restores_snapshot() {
        let mut history = HighlightHistory::new();
        history.add(ann("red", "r1"));
        history.add(ann("blue", "r2"));
        history.remove(ann("red", "r1"));
        let before: Vec<Annotation> = history.snapshot().to_vec();

        assert!(history.undo());
        assert!(history.redo());
        assert_eq!(history.snapshot(), before.as_slice());
    }

    #[test]
    fn duplicate_range_key_add_is_a_noop() {
        let mut history = HighlightHistory::new();
        assert!(history.add(ann("red", "r1")));
        assert!(!history.add(ann("blue", "r1")));

        assert_eq!(history.snapshot().len(), 1);
        assert_eq!(history.snapshot()[0].color, "red");
        assert!(history.can_undo());
        history.undo();
        assert!(!history.can_undo(), "only one action should be recorded");
    }

    #[test]
    fn removing_missing_key_changes_nothing() {
        let mut history = HighlightHistory::new();
        assert!(!history.remove(ann("red", "missing")));
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn double_undo_then_redo_replays_first_add() {
        let mut history = HighlightHistory::new();
        let a = ann("red", "a");
        let b = ann("green", "b");
        history.add(a.clone());
        history.add(b);

        history.undo();
        history.undo();
        history.redo();
        assert_eq!(history.snapshot(), &[a]);
    }

    #[test]
    fn undo_of_clear_restores_exact_list() {
        let mut history = HighlightHistory::new();
        let a = ann("red", "a");
        let b = ann("blue", "b");
        history.add(a.clone());
        history.add(b.clone());

        assert!(history.clear_all());
        assert!(history.is_empty());
        assert!(history.undo());
        assert_eq!(history.snapshot(), &[a, b]);
    }

    #[test]
    fn clear_snapshot_is_a_copy_not_a_reference() {
        let mut history = HighlightHistory::new();
        history.add(ann("red", "a"));
        history.clear_all();
        // Mutate live after the clear; the stored snapshot must not move.
        history.add(ann("blue", "later"));
        history.undo(); // undoes the add
        history.undo(); // undoes the clear
        assert_eq!(history.snapshot(), &[ann("red", "a")]);
    }

    #[test]
    fn forward_mutation_invalidates_redo() {
        let mut history = HighlightHistory::new();
        history.add(ann("red", "a"));
        history.undo();
        assert!(history.can_redo());

        history.add(ann("blue", "b"));
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.snapshot(), &[ann("blue", "b")]);
    }

    #[test]
    fn redo_of_clear_empties_live_again() {
        let mut history = HighlightHistory::new();
        history.add(ann("red", "a"));
        history.clear_all();
        history.undo();
        assert!(!history.is_empty());
        assert!(history.redo());
        assert!(history.is_empty());
    }

    #[test]
    fn seeding_from_saved_list_starts_with_empty_history() {
        let saved = vec![ann("green", "p3-10-20")];
        let mut history = HighlightHistory::from_saved(saved.clone());
        assert_eq!(history.snapshot(), saved.as_slice());
        assert!(!history.undo());
        assert_eq!(history.snapshot(), saved.as_slice());
    }

    #[test]
    fn seeding_drops_duplicate_keys() {
        let history = HighlightHistory::from_saved(vec![
            ann("red", "a"),
            ann("blue", "a"),
            ann("green", "b"),
        ]);
        assert_eq!(history.snapshot(), &[ann("red", "a"), ann("green", "b")]);
    }

    #[test]
    fn undo_of_remove_reinserts_annotation() {
        let mut history = HighlightHistory::new();
        let a = ann("magenta", "m");
        history.add(a.clone());
        history.remove(a.clone());
        assert!(history.is_empty());
        history.undo();
        assert_eq!(history.snapshot(), &[a]);
    }

    #[test]
    fn erase_matches_on_range_key_even_with_stale_color() {
        let mut history = HighlightHistory::new();
        history.add(ann("red", "r1"));
        // A stale marker click may carry an outdated color; the key wins.
        assert!(history.remove(ann("blue", "r1")));
        assert!(history.is_empty());
    }

    #[test]
    fn clear_on_empty_store_records_nothing() {
        let mut history = HighlightHistory::new();
        assert!(!history.clear_all());
        assert!(!history.can_undo());
    }

    #[test]
    fn selection_mapper_honors_mode() {
        assert_eq!(annotation_for_selection(Mode::Select, Some("k")), None);
        assert_eq!(annotation_for_selection(Mode::Erase, Some("k")), None);
        assert_eq!(
            annotation_for_selection(Mode::Highlight(PaletteColor::Red), Some("k")),
            Some(ann("red", "k"))
        );
    }

    #[test]
    fn selection_mapper_ignores_empty_selection() {
        let mode = Mode::Highlight(PaletteColor::Green);
        assert_eq!(annotation_for_selection(mode, None), None);
        assert_eq!(annotation_for_selection(mode, Some("")), None);
        assert_eq!(annotation_for_selection(mode, Some("   ")), None);
    }

    #[test]
    fn annotation_serde_uses_camel_case_keys() {
        let json = serde_json::to_string(&ann("green", "loc2-p4")).unwrap();
        assert_eq!(json, r#"{"color":"green","rangeKey":"loc2-p4"}"#);
        let back: Annotation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ann("green", "loc2-p4"));
    }
}
