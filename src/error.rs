//! Error types for the line store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`LineStore`](crate::store::LineStore).
///
/// Only file I/O and the [`validate`](crate::store::LineStore::validate)
/// diagnostic produce errors. Out-of-range edits and navigation are
/// reported through `bool` and `Option` returns instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no file name given")]
    NoPath,

    #[error("line {row} is empty (every line ends with a terminator)")]
    EmptyLine { row: usize },

    #[error("line {row} does not end with a terminator")]
    Unterminated { row: usize },

    #[error("line chain is broken at row {row}")]
    BrokenChain { row: usize },
}

impl StoreError {
    /// The underlying I/O error, if this is a load or save failure.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used throughout the store.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_show_source_message() {
        let err = StoreError::Read {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "failed to read missing.txt: no such file");
        assert_eq!(
            err.io_error().map(io::Error::kind),
            Some(io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_validation_errors_name_the_row() {
        let err = StoreError::Unterminated { row: 3 };
        assert!(err.to_string().contains("line 3"));
        assert!(err.io_error().is_none());
    }
}
