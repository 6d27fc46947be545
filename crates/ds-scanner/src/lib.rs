//! Filesystem traversal for the disk-scan service.
//!
//! This crate walks a disk's directory tree and produces the entry listing
//! that the server caches and reports. It exposes:
//!
//! - [`Scan`] - the trait the scan coordinator depends on
//! - [`DiskWalker`] - the production implementation, built on the `ignore`
//!   crate with its filters disabled
//! - [`ScanError`] - traversal failures
//!
//! # Architecture
//!
//! The scanning pipeline:
//!
//! ```text
//! Disk root -> DiskWalker -> Vec<Entry> (sorted by path)
//! ```
//!
//! The walker reports paths relative to the disk root so listings compare
//! equal across hosts that mount the same disk at different locations.
//!
//! # Examples
//!
//! ```ignore
//! use ds_scanner::{DiskWalker, Scan};
//! use camino::Utf8Path;
//!
//! let walker = DiskWalker::new();
//! let entries = walker.scan(Utf8Path::new("/mnt/media"))?;
//! println!("{} files", entries.len());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod walker;

pub use error::ScanError;
pub use walker::DiskWalker;

use camino::Utf8Path;
use ds_core::Entry;

/// A source of disk listings.
///
/// The scan coordinator is generic over this trait so tests can substitute
/// instrumented implementations (counting calls, blocking mid-scan, or
/// failing on demand) without touching a real filesystem.
pub trait Scan: Send + Sync {
    /// Produces the full entry listing for the disk rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] when the root is unusable or traversal fails.
    fn scan(&self, root: &Utf8Path) -> Result<Vec<Entry>, ScanError>;
}
