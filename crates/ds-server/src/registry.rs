//! Shared registry of disks and their cached scan results.
//!
//! This module provides [`DiskRegistry`], a thread-safe map from disk name
//! to [`DiskRecord`], preserving configuration order.
//!
//! # Safety Pattern
//!
//! To keep lock scopes trivial, this registry:
//!
//! - **Never exposes guard types** publicly
//! - **Clones data** on `get()` operations
//! - **Uses short-lived scopes** for internal locking
//!
//! Readers therefore see a point-in-time copy of a record; the registry is
//! never locked across a scan. Write serialization is not this type's job:
//! the scan coordinator's busy flag guarantees at most one writer at a time.
//!
//! # Examples
//!
//! ```
//! use ds_server::DiskRegistry;
//! use ds_core::DisksConfig;
//!
//! let disks = DisksConfig::parse(r#"{"media": {"path": "/mnt/media"}}"#);
//! let registry = DiskRegistry::from_config(&disks);
//!
//! let record = registry.get("media").unwrap();
//! assert!(record.is_unscanned());
//! ```

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use ds_core::{DiskRecord, DisksConfig, Entry};
use indexmap::IndexMap;
use parking_lot::RwLock;

/// Thread-safe, insertion-ordered store of [`DiskRecord`]s.
///
/// Keyed by disk name. The disk set is fixed at construction; only each
/// record's `content` and `last_scan` change afterwards, via
/// [`DiskRegistry::set_result`].
#[derive(Debug, Default)]
pub struct DiskRegistry {
    disks: RwLock<IndexMap<String, DiskRecord>>,
}

impl DiskRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from the configured disk set.
    ///
    /// Every record starts unscanned: empty content, no timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_server::DiskRegistry;
    /// use ds_core::DisksConfig;
    ///
    /// let disks = DisksConfig::parse(r#"{"a": {"path": "/mnt/a"}, "b": {"path": "/mnt/b"}}"#);
    /// let registry = DiskRegistry::from_config(&disks);
    /// assert_eq!(registry.names(), vec!["a", "b"]);
    /// ```
    #[must_use]
    pub fn from_config(config: &DisksConfig) -> Self {
        let disks = config
            .iter()
            .map(|(name, disk)| (name.to_owned(), DiskRecord::new(name, disk.path.clone())))
            .collect();
        Self {
            disks: RwLock::new(disks),
        }
    }

    /// Returns a clone of the record for the given disk, if configured.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<DiskRecord> {
        self.disks.read().get(name).cloned()
    }

    /// Returns `true` if the disk is configured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.disks.read().contains_key(name)
    }

    /// Returns the root path of the given disk, if configured.
    #[must_use]
    pub fn path_of(&self, name: &str) -> Option<Utf8PathBuf> {
        self.disks.read().get(name).map(|record| record.path.clone())
    }

    /// Returns the configured disk names in configuration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.disks.read().keys().cloned().collect()
    }

    /// Overwrites a disk's scan result and timestamp.
    ///
    /// Content is replaced, never merged. A failed scan stores an empty
    /// content list here so stale listings are not served as current.
    ///
    /// Returns a clone of the updated record, or `None` for an unknown disk.
    pub fn set_result(
        &self,
        name: &str,
        content: Vec<Entry>,
        timestamp: DateTime<Utc>,
    ) -> Option<DiskRecord> {
        let mut disks = self.disks.write();
        let record = disks.get_mut(name)?;
        record.content = content;
        record.last_scan = Some(timestamp);
        Some(record.clone())
    }

    /// Returns the number of configured disks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.disks.read().len()
    }

    /// Returns `true` if no disks are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disks.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(raw: &str) -> DiskRegistry {
        DiskRegistry::from_config(&DisksConfig::parse(raw))
    }

    #[test]
    fn test_from_config_preserves_order() {
        let registry = registry_with(r#"{"b": {"path": "/mnt/b"}, "a": {"path": "/mnt/a"}}"#);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_get_returns_unscanned_record() {
        let registry = registry_with(r#"{"a": {"path": "/mnt/a"}}"#);
        let record = registry.get("a").unwrap();
        assert_eq!(record.name, "a");
        assert_eq!(record.path, "/mnt/a");
        assert!(record.is_unscanned());
        assert!(record.last_scan.is_none());
    }

    #[test]
    fn test_get_unknown_disk() {
        let registry = registry_with(r#"{"a": {"path": "/mnt/a"}}"#);
        assert!(registry.get("nope").is_none());
        assert!(!registry.contains("nope"));
        assert!(registry.path_of("nope").is_none());
    }

    #[test]
    fn test_set_result_overwrites() {
        let registry = registry_with(r#"{"a": {"path": "/mnt/a"}}"#);
        let first = Utc::now();

        let entries = vec![Entry::new(Utf8PathBuf::from("f1"), 1)];
        let updated = registry.set_result("a", entries, first).unwrap();
        assert_eq!(updated.content.len(), 1);
        assert_eq!(updated.last_scan, Some(first));

        // A later empty result replaces the content wholesale.
        let second = Utc::now();
        let cleared = registry.set_result("a", Vec::new(), second).unwrap();
        assert!(cleared.content.is_empty());
        assert_eq!(cleared.last_scan, Some(second));
    }

    #[test]
    fn test_set_result_unknown_disk() {
        let registry = registry_with("{}");
        assert!(registry.set_result("a", Vec::new(), Utc::now()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_returns_clone_not_view() {
        let registry = registry_with(r#"{"a": {"path": "/mnt/a"}}"#);
        let before = registry.get("a").unwrap();
        registry.set_result("a", vec![Entry::new(Utf8PathBuf::from("f1"), 1)], Utc::now());
        assert!(before.is_unscanned());
        assert!(!registry.get("a").unwrap().is_unscanned());
    }
}
