//! NoteRepository: the process-wide note collection
//!
//! Holds the notes in memory and writes the full collection through to the
//! file store on every append. The write lock is held across the push and
//! the save, so appends are serialized and the file is never written
//! concurrently.

use parking_lot::RwLock;

use super::NoteFileStore;
use crate::error::NoteError;
use crate::models::Note;

pub struct NoteRepository {
    store: NoteFileStore,
    notes: RwLock<Vec<Note>>,
}

impl NoteRepository {
    /// Create the repository, loading whatever the store currently holds
    pub fn open(store: NoteFileStore) -> Self {
        let notes = store.load();
        Self {
            store,
            notes: RwLock::new(notes),
        }
    }

    /// Snapshot of all notes, oldest first
    pub fn list(&self) -> Vec<Note> {
        self.notes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }

    pub fn store(&self) -> &NoteFileStore {
        &self.store
    }

    /// Append a note and persist the whole collection.
    ///
    /// If the save fails the note is removed again, so memory never claims
    /// more than the file holds.
    pub fn append(&self, title: &str, content: &str, author: &str) -> Result<Note, NoteError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(NoteError::Validation(
                "title and content are required".to_string(),
            ));
        }

        let note = Note::new(title, content, author);

        let mut notes = self.notes.write();
        notes.push(note.clone());

        if let Err(e) = self.store.save(&notes) {
            notes.pop();
            log::error!(
                "[NOTES] Failed to persist note {:?}, rolled back: {}",
                note.title,
                e
            );
            return Err(e.into());
        }

        log::info!("[NOTES] {} added note {:?} ({} total)", author, note.title, notes.len());
        Ok(note)
    }
}
