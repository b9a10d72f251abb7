//! The native document boundary.
//!
//! Everything the UI knows about a document on disk comes through here:
//! opening it, loading its saved highlights, and writing them back. The
//! reducer never touches the filesystem itself; it issues effects that
//! call into this module and consumes the resulting messages.

use crate::highlights::Annotation;
use crate::storage::{Storage, path_uid};
use anyhow::{Context, Result, anyhow};
use epub::doc::EpubDoc;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Reflowable text; we extract and lay out the content ourselves.
    Epub,
    /// Fixed layout; pages are rendered elsewhere and the page count is
    /// unknown until the renderer reports it.
    Pdf,
}

/// One spine location of a reflowable document, split into the
/// paragraphs the reader renders as selectable spans.
#[derive(Debug, Clone)]
pub struct Location {
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub uid: String,
    pub title: String,
    pub kind: DocumentKind,
    pub locations: Vec<Location>,
}

impl LoadedDocument {
    /// Page count as known at load time; `None` for fixed-layout
    /// documents until the renderer reports one.
    pub fn page_count(&self) -> Option<usize> {
        match self.kind {
            DocumentKind::Epub => Some(self.locations.len()),
            DocumentKind::Pdf => None,
        }
    }
}

/// The span id a rendered paragraph carries. Opaque to the highlight
/// store; only ever compared for equality.
pub fn span_key(location: usize, paragraph: usize) -> String {
    format!("loc{location}-p{paragraph}")
}

/// Open a document from disk and prepare it for the reader.
pub fn open_document(path: &Path) -> Result<LoadedDocument> {
    match extension(path).as_deref() {
        Some("epub") => open_epub(path),
        Some("pdf") => open_pdf(path),
        other => Err(anyhow!(
            "Unsupported document type {:?} at {}",
            other,
            path.display()
        )),
    }
}

/// Load the saved highlights for a document. Any failure degrades to an
/// empty list so the reader always opens.
pub fn load_annotations(storage: &Storage, uid: &str) -> Vec<Annotation> {
    let path = storage.highlights_path(uid);
    match storage.load_json::<Vec<Annotation>>(&path) {
        Some(annotations) => {
            info!(uid, count = annotations.len(), "Loaded saved highlights");
            annotations
        }
        None => Vec::new(),
    }
}

/// Write the full highlight list for a document. All-or-nothing; the
/// caller logs failures and does not retry.
pub fn save_annotations(storage: &Storage, uid: &str, annotations: &[Annotation]) -> Result<()> {
    let path = storage.highlights_path(uid);
    storage
        .save_json(&path, &annotations)
        .with_context(|| format!("Failed to save highlights for {uid}"))?;
    debug!(uid, count = annotations.len(), "Saved highlights");
    Ok(())
}

fn open_epub(path: &Path) -> Result<LoadedDocument> {
    info!(path = %path.display(), "Opening EPUB");
    let mut doc =
        EpubDoc::new(path).with_context(|| format!("Failed to open EPUB at {}", path.display()))?;

    let uid = doc
        .unique_identifier
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| path_uid(path));
    let title = document_title(doc.mdata("title").map(|item| item.value.clone()), path);

    let mut locations = Vec::new();
    loop {
        if let Some((chapter, _mime)) = doc.get_current_str() {
            // Strip markup; fall back to the raw chapter on errors. A very
            // large width avoids baked-in hard line breaks.
            let plain = match html2text::from_read(chapter.as_bytes(), 10_000) {
                Ok(clean) => clean,
                Err(err) => {
                    warn!(location = locations.len(), "html2text failed: {err}");
                    chapter
                }
            };
            let paragraphs = split_paragraphs(&plain);
            debug!(
                location = locations.len(),
                paragraphs = paragraphs.len(),
                "Parsed spine location"
            );
            locations.push(Location { paragraphs });
        }
        if !doc.go_next() {
            break;
        }
    }

    if locations.iter().all(|l| l.paragraphs.is_empty()) {
        locations = vec![Location {
            paragraphs: vec!["No textual content found in this EPUB.".to_string()],
        }];
    }

    info!(
        uid,
        title,
        locations = locations.len(),
        "Finished loading EPUB"
    );
    Ok(LoadedDocument {
        uid,
        title,
        kind: DocumentKind::Epub,
        locations,
    })
}

fn open_pdf(path: &Path) -> Result<LoadedDocument> {
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }
    let title = document_title(None, path);
    info!(path = %path.display(), title, "Opening PDF shell");
    Ok(LoadedDocument {
        uid: path_uid(path),
        title,
        kind: DocumentKind::Pdf,
        locations: Vec::new(),
    })
}

/// Title fallback chain: package metadata, then the file stem.
fn document_title(metadata_title: Option<String>, path: &Path) -> String {
    metadata_title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| file_stem(path))
        .unwrap_or_else(|| "Untitled".to_string())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
}

/// Split text into paragraphs separated by blank lines.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut buffer = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !buffer.is_empty() {
                paragraphs.push(buffer.join("\n"));
                buffer.clear();
            }
        } else {
            buffer.push(line);
        }
    }

    if !buffer.is_empty() {
        paragraphs.push(buffer.join("\n"));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_keys_are_per_location_per_paragraph() {
        assert_eq!(span_key(0, 0), "loc0-p0");
        assert_eq!(span_key(3, 12), "loc3-p12");
        assert_ne!(span_key(1, 2), span_key(2, 1));
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let text = "first line\nsecond line\n\n\nnext para\n";
        let paras = split_paragraphs(text);
        assert_eq!(paras, vec!["first line\nsecond line", "next para"]);
    }

    #[test]
    fn empty_text_has_no_paragraphs() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n  \n\t\n").is_empty());
    }

    #[test]
    fn title_falls_back_from_metadata_to_file_stem() {
        let path = Path::new("/books/deep-work.epub");
        assert_eq!(document_title(Some("Deep Work".into()), path), "Deep Work");
        assert_eq!(document_title(Some("   ".into()), path), "deep-work");
        assert_eq!(document_title(None, path), "deep-work");
        assert_eq!(document_title(None, Path::new("")), "Untitled");
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        assert!(open_document(Path::new("notes.docx")).is_err());
    }

    #[test]
    fn missing_annotations_load_as_empty() {
        let storage = Storage::new(std::env::temp_dir().join("studyhub-none"));
        assert!(load_annotations(&storage, "no-such-doc").is_empty());
    }
}
