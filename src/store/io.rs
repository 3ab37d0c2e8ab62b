use std::fs;
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::perf;

use super::LineStore;

impl LineStore {
    /// Replace the content with the file at `path`.
    ///
    /// On success the path becomes the store's name and the store is
    /// clean. On failure the current content is left untouched.
    ///
    /// # Errors
    /// Returns [`StoreError::Read`] if the file cannot be read as UTF-8.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let _scope = perf::scope("store.load");
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.set_text(&content);
        self.name = Some(path.to_path_buf());
        self.dirty = false;
        perf::event("store.load")
            .field("path", path.display())
            .field("lines", self.line_count)
            .field("bytes", content.len())
            .field("version", self.version)
            .emit();
        tracing::debug!(path = %path.display(), lines = self.line_count, "loaded");
        Ok(())
    }

    /// Write the content to the store's name.
    ///
    /// # Errors
    /// Returns [`StoreError::NoPath`] if no name is known, or
    /// [`StoreError::Write`] if the write fails.
    pub fn save(&mut self) -> Result<()> {
        let path = self.name.clone().ok_or(StoreError::NoPath)?;
        self.save_as(path)
    }

    /// Write the content to `path` and adopt it as the store's name.
    ///
    /// Lines are joined by terminators with none after the last line.
    ///
    /// # Errors
    /// Returns [`StoreError::NoPath`] for an empty path, or
    /// [`StoreError::Write`] if the write fails.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StoreError::NoPath);
        }
        fs::write(path, self.text()).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.name = Some(path.to_path_buf());
        self.dirty = false;
        tracing::debug!(path = %path.display(), lines = self.line_count, "saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use tempfile::tempdir;

    #[test]
    fn test_load_reads_file_and_names_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "one\ntwo\n").unwrap();

        let mut store = LineStore::new();
        store.mark_dirty();
        store.load(&path).unwrap();
        assert_eq!(store.text(), "one\ntwo");
        assert_eq!(store.name(), Some(path.as_path()));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_load_failure_keeps_content() {
        let dir = tempdir().unwrap();
        let mut store = LineStore::from_text("keep me");
        let err = store.load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert_eq!(
            err.io_error().map(std::io::Error::kind),
            Some(std::io::ErrorKind::NotFound)
        );
        assert_eq!(store.text(), "keep me");
        assert_eq!(store.name(), None);
    }

    #[test]
    fn test_save_without_name_fails() {
        let mut store = LineStore::from_text("orphan");
        assert!(matches!(store.save(), Err(StoreError::NoPath)));
        assert!(matches!(store.save_as(""), Err(StoreError::NoPath)));
    }

    #[test]
    fn test_save_as_writes_without_trailing_terminator() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut store = LineStore::from_text("a\nb\n");
        store.insert_char(Position::new(1, 1), '!');
        store.save_as(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb!");
        assert!(!store.is_dirty());
        assert_eq!(store.name(), Some(path.as_path()));
    }

    #[test]
    fn test_save_reuses_loaded_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "draft").unwrap();

        let mut store = LineStore::new();
        store.load(&path).unwrap();
        store.insert_text(Position::new(5, 0), " two");
        store.save().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "draft two");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let mut store = LineStore::from_text("x");
        let err = store.save_as(dir.path().join("no/such/dir.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(store.name().is_none());
    }
}
