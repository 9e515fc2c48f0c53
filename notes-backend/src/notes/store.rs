//! NoteFileStore: flat-file persistence for the note collection
//!
//! The whole collection lives in a single JSON array. Loading never fails:
//! a missing, empty or unparsable file yields an empty collection.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::file_ops;
use crate::error::StorageError;
use crate::models::Note;

/// Reads and writes the complete note collection as one JSON file
#[derive(Debug, Clone)]
pub struct NoteFileStore {
    path: PathBuf,
}

impl NoteFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the notes file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored note, oldest first
    pub fn load(&self) -> Vec<Note> {
        let raw = match file_ops::read_file(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!(
                    "[NOTES] Could not read {:?}, starting with an empty note list: {}",
                    self.path,
                    e
                );
                return Vec::new();
            }
        };

        match parse_notes(&raw) {
            Ok(notes) => {
                log::info!("[NOTES] Loaded {} notes from {:?}", notes.len(), self.path);
                notes
            }
            Err(e) => {
                log::warn!("[NOTES] {} ({:?}); starting with an empty note list", e, self.path);
                Vec::new()
            }
        }
    }

    /// Overwrite the file with the full collection
    pub fn save(&self, notes: &[Note]) -> Result<(), StorageError> {
        let bytes = serialize_notes(notes)?;
        file_ops::write_atomic(&self.path, &bytes)?;
        log::debug!("[NOTES] Saved {} notes to {:?}", notes.len(), self.path);
        Ok(())
    }
}

/// Parse file contents; blank input is an empty collection, not an error
fn parse_notes(raw: &str) -> Result<Vec<Note>, StorageError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(StorageError::Corrupt)
}

/// Pretty JSON with 4-space indentation; non-ASCII text is written as-is
fn serialize_notes(notes: &[Note]) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    notes.serialize(&mut ser).map_err(StorageError::Serialize)?;
    Ok(buf)
}
