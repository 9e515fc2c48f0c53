//! Notes system: an append-only note list mirrored to a JSON file
//!
//! `NoteFileStore` owns the file format, `NoteRepository` owns the in-memory
//! collection and the write-through append.

pub mod file_ops;
pub mod repository;
pub mod store;

pub use repository::NoteRepository;
pub use store::NoteFileStore;
