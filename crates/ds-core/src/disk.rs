//! In-memory model for disks and their cached scan results.
//!
//! A "disk" is a named logical root directory configured at startup, not a
//! physical device. Each disk carries the most recent scan result: an
//! ordered list of [`Entry`] descriptors plus the time the scan ran.

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single filesystem entry produced by a disk scan.
///
/// Paths are relative to the disk root so responses stay stable when the
/// same disk is mounted at different absolute locations across hosts.
///
/// # Examples
///
/// ```
/// use ds_core::Entry;
/// use camino::Utf8PathBuf;
///
/// let entry = Entry::new(Utf8PathBuf::from("docs/report.pdf"), 4096);
/// assert_eq!(entry.path, "docs/report.pdf");
/// assert!(entry.modified.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Path relative to the disk root.
    pub path: Utf8PathBuf,

    /// File size in bytes.
    pub size: u64,

    /// Last modification time, when the filesystem reports one.
    pub modified: Option<DateTime<Utc>>,
}

impl Entry {
    /// Creates an entry with no modification time.
    #[must_use]
    pub fn new(path: Utf8PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            modified: None,
        }
    }

    /// Sets the modification time.
    #[must_use]
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// A named disk and its most recent scan result.
///
/// Records are owned exclusively by the disk registry. `name` and `path`
/// are immutable after load; `content` and `last_scan` are overwritten
/// (never appended) on each scan, successful or failed. A failed scan
/// deliberately clears stale content rather than leaving it behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskRecord {
    /// The disk's configured name (registry key).
    pub name: String,

    /// Root directory the disk maps to.
    pub path: Utf8PathBuf,

    /// When the disk was last scanned. `None` until the first scan.
    pub last_scan: Option<DateTime<Utc>>,

    /// Entries from the most recent scan. Empty until the first scan,
    /// and emptied again by a failed scan.
    pub content: Vec<Entry>,
}

impl DiskRecord {
    /// Creates an unscanned record for a configured disk.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_core::DiskRecord;
    /// use camino::Utf8PathBuf;
    ///
    /// let record = DiskRecord::new("media", Utf8PathBuf::from("/mnt/media"));
    /// assert!(record.last_scan.is_none());
    /// assert!(record.content.is_empty());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, path: Utf8PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
            last_scan: None,
            content: Vec::new(),
        }
    }

    /// Returns `true` if the disk has never produced scan content.
    ///
    /// This is the trigger condition for lazy population on read.
    #[inline]
    #[must_use]
    pub fn is_unscanned(&self) -> bool {
        self.content.is_empty()
    }
}
