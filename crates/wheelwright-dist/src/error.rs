//! Error types for archive assembly.

use thiserror::Error;

/// Errors that can occur while assembling a distribution archive.
#[derive(Debug, Error)]
pub enum DistError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory walk error while collecting files.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The same archive path was produced twice.
    #[error("duplicate archive path: {0}")]
    DuplicateEntry(String),

    /// An archive-serialization invariant was violated.
    #[error("archive format error: {0}")]
    Format(String),
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn DistError___duplicate_entry___displays_path() {
        let err = DistError::DuplicateEntry("my_package/__init__.py".to_string());

        assert_eq!(
            err.to_string(),
            "duplicate archive path: my_package/__init__.py"
        );
    }

    #[test]
    fn DistError___from_io_error___converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DistError = io_err.into();

        assert!(matches!(err, DistError::Io(_)));
    }
}
