//! Error types for the ds-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! while traversing a disk root.

use camino::Utf8PathBuf;

/// Errors that can occur during a disk traversal.
///
/// # Error Recovery Strategy
///
/// - **Root errors** ([`ScanError::RootMissing`], [`ScanError::RootNotDirectory`]):
///   fatal for the scan - the whole disk is unreadable
/// - **Walk errors** ([`ScanError::Walk`]): fatal - traversal cannot continue
/// - **Metadata errors** ([`ScanError::Metadata`]): recoverable - the entry is
///   listed with what is known and the walk continues
///
/// The coordinator treats any returned `ScanError` as a whole-disk failure:
/// the disk's cached content is cleared and the failure detail is surfaced
/// to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The disk root does not exist.
    #[error("disk root does not exist: {0}")]
    RootMissing(Utf8PathBuf),

    /// The disk root exists but is not a directory.
    #[error("disk root is not a directory: {0}")]
    RootNotDirectory(Utf8PathBuf),

    /// Directory traversal failed.
    #[error("failed to walk disk root: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read an entry's metadata.
    ///
    /// Contains the path that failed and the underlying I/O error.
    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        /// The path whose metadata couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path is not valid UTF-8.
    ///
    /// This crate uses UTF-8 paths throughout. If a non-UTF-8 path is
    /// encountered, it cannot be listed.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl ScanError {
    /// Creates a new [`ScanError::Metadata`] error.
    #[inline]
    pub fn metadata(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error is recoverable (the walk can continue).
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Metadata { .. })
    }

    /// Returns `true` if this error aborts the whole disk scan.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::RootMissing(path) | Self::RootNotDirectory(path) | Self::Metadata { path, .. } => {
                Some(path)
            }
            Self::Walk(_) | Self::NonUtf8Path(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_root_missing_display() {
        let err = ScanError::RootMissing(Utf8PathBuf::from("/mnt/gone"));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("/mnt/gone"));
        assert_eq!(err.path().map(|p| p.as_str()), Some("/mnt/gone"));
    }

    #[test]
    fn test_metadata_is_recoverable() {
        let err = ScanError::metadata(
            "a/b.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
        assert_eq!(err.path().map(|p| p.as_str()), Some("a/b.txt"));
        assert!(err.to_string().contains("a/b.txt"));
    }

    #[test]
    fn test_non_utf8_has_no_path() {
        let err = ScanError::NonUtf8Path(std::path::PathBuf::from("weird"));
        assert!(err.is_fatal());
        assert!(err.path().is_none());
    }
}
