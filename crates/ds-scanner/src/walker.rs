//! Directory traversal for disk roots.
//!
//! This module provides [`DiskWalker`], which uses the `ignore` crate to
//! walk a disk's directory tree and produce [`Entry`] descriptors.
//!
//! Unlike a source-tree scanner, a disk listing wants everything: standard
//! filters are disabled so hidden files are included and no ignore files
//! are honored.
//!
//! # Examples
//!
//! ```ignore
//! use ds_scanner::{DiskWalker, Scan};
//! use camino::Utf8Path;
//!
//! let walker = DiskWalker::new();
//! let entries = walker.scan(Utf8Path::new("/mnt/media"))?;
//!
//! for entry in &entries {
//!     println!("{} ({} bytes)", entry.path, entry.size);
//! }
//! ```

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use ds_core::Entry;

use crate::Scan;
use crate::error::ScanError;

/// A walker that lists every file under a disk root.
///
/// # Design
///
/// The walk is single-threaded: scan serialization is enforced process-wide
/// by the coordinator, so per-scan parallelism would only reorder output.
/// Entry paths are reported relative to the disk root, keeping responses
/// stable across hosts that mount the same disk at different locations.
///
/// # Examples
///
/// ```
/// use ds_scanner::DiskWalker;
///
/// let walker = DiskWalker::new().with_follow_links(false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiskWalker {
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl DiskWalker {
    /// Creates a walker with default settings (symlinks not followed).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether to follow symbolic links.
    ///
    /// By default, symbolic links are not followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Builds the ignore walker for a disk root.
    fn build_walker(&self, root: &Utf8Path) -> ignore::Walk {
        WalkBuilder::new(root)
            // A disk listing includes hidden files and honors no ignore files
            .standard_filters(false)
            .follow_links(self.follow_links)
            // Single-threaded walk; the coordinator serializes scans anyway
            .threads(1)
            .require_git(false)
            .build()
    }

    /// Converts a directory entry into an [`Entry`], if it is a listable file.
    ///
    /// Returns `Ok(None)` for non-files. Metadata failures degrade to an
    /// entry with zero size and no timestamp.
    fn describe(
        entry: &ignore::DirEntry,
        root: &Utf8Path,
    ) -> Result<Option<Entry>, ScanError> {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            return Ok(None);
        }

        let path = entry.path();
        let utf8_path =
            Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;
        let relative = utf8_path.strip_prefix(root).unwrap_or(utf8_path);

        let described = match entry.metadata() {
            Ok(metadata) => {
                let modified = metadata
                    .modified()
                    .ok()
                    .map(DateTime::<Utc>::from);
                Entry {
                    path: relative.to_owned(),
                    size: metadata.len(),
                    modified,
                }
            }
            Err(error) => {
                warn!(path = %utf8_path, %error, "metadata unreadable, listing entry without it");
                Entry::new(relative.to_owned(), 0)
            }
        };

        Ok(Some(described))
    }
}

impl Scan for DiskWalker {
    /// Lists every file under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootMissing`] / [`ScanError::RootNotDirectory`]
    /// when the root is unusable, [`ScanError::Walk`] if traversal fails,
    /// and [`ScanError::NonUtf8Path`] for paths this crate cannot represent.
    fn scan(&self, root: &Utf8Path) -> Result<Vec<Entry>, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootMissing(root.to_owned()));
        }
        if !root.is_dir() {
            return Err(ScanError::RootNotDirectory(root.to_owned()));
        }

        let mut entries = Vec::new();
        for result in self.build_walker(root) {
            let entry = result?;
            if let Some(described) = Self::describe(&entry, root)? {
                entries.push(described);
            }
        }

        // Walk order is platform-dependent; sort for a stable listing
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(root = %root, entry_count = entries.len(), "disk walk complete");
        Ok(entries)
    }
}
