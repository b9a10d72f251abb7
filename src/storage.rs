//! Flat JSON storage for highlights and chats.
//!
//! Everything lives under the configured data directory:
//! `highlights/<uid>.json` holds the annotation list for one document,
//! `chats/<id>.json` holds one conversation and `chats/list.json` the
//! id-to-title index. Document uids are sanitized before use as
//! filenames; writes go through a temp file so a crash never leaves a
//! half-written payload behind.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Storage { root: root.into() }
    }

    pub fn highlights_path(&self, uid: &str) -> PathBuf {
        self.root
            .join("highlights")
            .join(format!("{}.json", sanitize(uid)))
    }

    pub fn chat_path(&self, chat_id: &str) -> PathBuf {
        self.root
            .join("chats")
            .join(format!("{}.json", sanitize(chat_id)))
    }

    pub fn chat_index_path(&self) -> PathBuf {
        self.root.join("chats").join("list.json")
    }

    /// Read and parse a JSON payload. Missing files are silent; malformed
    /// ones log a warning. Both yield `None`, so callers treat bad data
    /// as absent.
    pub fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let data = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&data) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %path.display(), "Discarding malformed JSON: {err}");
                None
            }
        }
    }

    /// All-or-nothing JSON write: serialize, write to a sibling temp
    /// file, then rename over the target.
    pub fn save_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let payload = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move {} into place", path.display()))?;
        Ok(())
    }

    pub fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))
    }
}

/// Derive a stable uid from a filesystem path, for documents whose
/// metadata carries no usable identifier.
pub fn path_uid(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_os_str().to_string_lossy().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_filenames_safe() {
        assert_eq!(sanitize("urn:isbn:978-0"), "urn-isbn-978-0");
        assert_eq!(sanitize("plain_id.1"), "plain_id.1");
        assert_eq!(sanitize("a/b\\c"), "a-b-c");
    }

    #[test]
    fn path_uid_is_stable_and_hex() {
        let a = path_uid(Path::new("/books/rust.epub"));
        let b = path_uid(Path::new("/books/rust.epub"));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, path_uid(Path::new("/books/other.epub")));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = std::env::temp_dir().join(format!("studyhub-test-{}", std::process::id()));
        let storage = Storage::new(&dir);
        let path = storage.highlights_path("doc:1");

        storage
            .save_json(&path, &vec!["one".to_string(), "two".to_string()])
            .unwrap();
        let back: Vec<String> = storage.load_json(&path).unwrap();
        assert_eq!(back, vec!["one", "two"]);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_json_reads_as_absent() {
        let dir = std::env::temp_dir().join(format!("studyhub-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let storage = Storage::new(&dir);
        assert!(storage.load_json::<Vec<String>>(&path).is_none());

        let _ = fs::remove_dir_all(dir);
    }
}
