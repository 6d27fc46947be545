//! Error types for the ds-server crate.
//!
//! This module provides [`ScanRequestError`], the failure modes of a scan
//! request as seen by the HTTP layer. None of these are fatal to the
//! process; every variant maps to a well-formed JSON error body.

use ds_scanner::ScanError;

/// Errors produced while servicing a scan or disk request.
///
/// # Error Recovery Strategy
///
/// - **Busy** ([`ScanRequestError::Busy`]): transient - the caller retries
///   once the in-flight scan finishes
/// - **Unknown disk** ([`ScanRequestError::UnknownDisk`]): caller error -
///   nothing in the registry is touched
/// - **Scan failure** ([`ScanRequestError::ScanFailed`]): the disk's cached
///   content has been cleared and its timestamp set; detail travels in the
///   source error
/// - **Task failure** ([`ScanRequestError::Task`]): the blocking-pool task
///   was cancelled or panicked; the busy flag is still released
#[derive(Debug, thiserror::Error)]
pub enum ScanRequestError {
    /// Another scan holds the busy flag.
    #[error("a scan is already in progress, try again later")]
    Busy,

    /// The named disk is not configured.
    #[error("invalid disk '{0}'")]
    UnknownDisk(String),

    /// The traversal itself failed; the disk's content was cleared.
    #[error("scan of disk '{name}' failed")]
    ScanFailed {
        /// The disk whose scan failed.
        name: String,
        /// The underlying traversal error.
        #[source]
        source: ScanError,
    },

    /// The blocking task running the traversal did not complete.
    #[error("scan task did not complete")]
    Task(#[from] tokio::task::JoinError),
}

impl ScanRequestError {
    /// Creates a new [`ScanRequestError::UnknownDisk`] error.
    #[inline]
    pub fn unknown_disk(name: impl Into<String>) -> Self {
        Self::UnknownDisk(name.into())
    }

    /// Creates a new [`ScanRequestError::ScanFailed`] error.
    #[inline]
    pub fn scan_failed(name: impl Into<String>, source: ScanError) -> Self {
        Self::ScanFailed {
            name: name.into(),
            source,
        }
    }

    /// Returns `true` if the request was rejected because a scan is running.
    #[inline]
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Returns the disk name associated with this error, if any.
    #[must_use]
    pub fn disk(&self) -> Option<&str> {
        match self {
            Self::UnknownDisk(name) | Self::ScanFailed { name, .. } => Some(name),
            Self::Busy | Self::Task(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_busy_display() {
        let err = ScanRequestError::Busy;
        assert!(err.is_busy());
        assert!(err.disk().is_none());
        assert!(err.to_string().contains("already in progress"));
    }

    #[test]
    fn test_unknown_disk_display() {
        let err = ScanRequestError::unknown_disk("media");
        assert!(!err.is_busy());
        assert_eq!(err.disk(), Some("media"));
        assert_eq!(err.to_string(), "invalid disk 'media'");
    }

    #[test]
    fn test_scan_failed_carries_source() {
        let err = ScanRequestError::scan_failed(
            "media",
            ScanError::RootMissing(Utf8PathBuf::from("/mnt/media")),
        );
        assert_eq!(err.disk(), Some("media"));
        assert!(err.to_string().contains("media"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert!(source.is_some_and(|s| s.contains("/mnt/media")));
    }
}
