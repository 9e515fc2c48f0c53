//! File operations for the notes file
//!
//! Reading tolerates a missing file; writing replaces the target atomically
//! through a sibling temporary file and a rename.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Read a file, returning empty string if not found
pub fn read_file(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// Sibling path used while a new version of `path` is being written
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "notes".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Whether `write_atomic` could create `path`: the nearest existing ancestor
/// has to be a directory
pub fn parent_is_usable(path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .find(|dir| dir.as_os_str().is_empty() || dir.exists())
        .map_or(true, |dir| dir.as_os_str().is_empty() || dir.is_dir())
}

/// Replace the file at `path` with `content` (creates parent directories as needed).
///
/// Readers see either the old or the new content, never a partial write.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = temp_path_for(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/notes.json");

        write_atomic(&path, "[]".as_bytes()).unwrap();
        assert_eq!(read_file(&path).unwrap(), "[]");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");

        write_atomic(&path, b"first version, rather long").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(read_file(&path).unwrap(), "second");
    }

    #[test]
    fn test_read_file_not_found() {
        let dir = tempdir().unwrap();
        let content = read_file(&dir.path().join("nonexistent.json")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_atomic(&blocker.join("notes.json"), b"[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/data/notes_data.json");
        assert_eq!(temp_path_for(path), PathBuf::from("/data/notes_data.json.tmp"));
    }

    #[test]
    fn test_parent_is_usable() {
        let dir = tempdir().unwrap();
        assert!(parent_is_usable(&dir.path().join("notes.json")));
        assert!(parent_is_usable(&dir.path().join("a").join("b").join("notes.json")));
        assert!(parent_is_usable(Path::new("notes.json")));

        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "regular file").unwrap();
        assert!(!parent_is_usable(&blocker.join("notes.json")));
    }
}
