//! Storage behind the ranking store.
//!
//! The store only needs three things from its storage: read everything,
//! create it empty, and replace everything. `FileBackend` is the real one;
//! `MemoryBackend` keeps the contents in memory for tests and demos.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;

/// Read/write contract for persisted rankings.
pub trait RankingBackend: Send + Sync {
    /// Read the full contents. `Ok(None)` means the storage does not exist.
    fn read(&self) -> io::Result<Option<String>>;

    /// Create the storage with no content, if it does not exist.
    fn create_empty(&self) -> io::Result<()>;

    /// Replace the full contents.
    ///
    /// Either the new contents are stored completely or the old contents
    /// are left untouched.
    fn replace(&self, contents: &str) -> io::Result<()>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Rankings stored in a plain text file.
#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl RankingBackend for FileBackend {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn create_empty(&self) -> io::Result<()> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map(drop)
    }

    fn replace(&self, contents: &str) -> io::Result<()> {
        let mut file = NamedTempFile::new_in(self.parent_dir())?;
        file.write_all(contents.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Rankings held in memory.
///
/// Writes can be switched off to simulate unwritable storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: Mutex<Option<String>>,
    read_only: Mutex<bool>,
}

impl MemoryBackend {
    /// Storage that does not exist yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            read_only: Mutex::new(false),
        }
    }

    /// Make every write fail with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.lock().unwrap_or_else(PoisonError::into_inner) = read_only;
    }

    /// Current contents, if the storage exists.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check_writable(&self) -> io::Result<()> {
        if *self.read_only.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "ranking storage is read-only",
            ));
        }
        Ok(())
    }
}

impl RankingBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents())
    }

    fn create_empty(&self) -> io::Result<()> {
        self.check_writable()?;
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(String::new);
        Ok(())
    }

    fn replace(&self, contents: &str) -> io::Result<()> {
        self.check_writable()?;
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("ranking.txt"));

        assert_eq!(backend.read().unwrap(), None);

        backend.create_empty().unwrap();
        assert_eq!(backend.read().unwrap(), Some(String::new()));
    }

    #[test]
    fn test_file_backend_create_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.txt");
        fs::write(&path, "Ana,3,2024-01-01 00:00:00\n").unwrap();

        let backend = FileBackend::new(&path);
        backend.create_empty().unwrap();

        assert_eq!(
            backend.read().unwrap().as_deref(),
            Some("Ana,3,2024-01-01 00:00:00\n")
        );
    }

    #[test]
    fn test_file_backend_replace() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("ranking.txt"));

        backend.replace("first\n").unwrap();
        backend.replace("second\n").unwrap();

        assert_eq!(backend.read().unwrap().as_deref(), Some("second\n"));
        // Only the ranking file is left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_backend_replace_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("missing").join("ranking.txt"));

        assert!(backend.replace("x\n").is_err());
    }

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read().unwrap(), None);

        backend.create_empty().unwrap();
        assert_eq!(backend.contents(), Some(String::new()));

        backend.replace("a,1,t\n").unwrap();
        assert_eq!(backend.contents().as_deref(), Some("a,1,t\n"));
    }

    #[test]
    fn test_memory_backend_read_only() {
        let backend = MemoryBackend::with_contents("a,1,t\n");
        backend.set_read_only(true);

        let err = backend.replace("b,2,t\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(backend.contents().as_deref(), Some("a,1,t\n"));
    }
}
