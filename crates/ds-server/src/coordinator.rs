//! Scan coordination and the process-wide busy flag.
//!
//! This module provides [`ScanCoordinator`], which serializes all scan
//! activity behind a single [`AtomicBool`]. At most one scan operation runs
//! at a time, process-wide; requests arriving while the flag is held are
//! rejected with [`ScanRequestError::Busy`] rather than queued.
//!
//! # Design
//!
//! The flag is acquired with an atomic compare-and-set, so check-and-claim
//! is indivisible: exactly one of any number of concurrent requests wins.
//! A [`ScanPermit`] guard releases the flag on drop, covering success,
//! scan failure, and panic unwinding alike.
//!
//! Traversals are synchronous filesystem work and run on the blocking pool
//! via [`tokio::task::spawn_blocking`], keeping the request executor free
//! to answer `/status` while a scan is in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use ds_core::DiskRecord;
use ds_scanner::Scan;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::error::ScanRequestError;
use crate::registry::DiskRegistry;

/// Exclusive claim on the process-wide busy flag.
///
/// Dropping the permit releases the flag, so every exit path from a scan
/// (success, traversal failure, panic) returns the coordinator to idle.
#[derive(Debug)]
struct ScanPermit {
    flag: Arc<AtomicBool>,
}

impl ScanPermit {
    /// Attempts to claim the flag. Returns `None` if a scan already holds it.
    fn acquire(flag: Arc<AtomicBool>) -> Option<Self> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(Self { flag })
        } else {
            None
        }
    }
}

impl Drop for ScanPermit {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Point-in-time view of the coordinator, valid mid-scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Whether a scan is currently in flight.
    pub running: bool,

    /// Configured disk names in configuration order.
    pub disks: Vec<String>,
}

/// A detached scan-all batch.
///
/// The batch runs in the background under a single busy-flag permit.
/// `handle` resolves when every disk has been attempted; callers that only
/// need fire-and-forget semantics drop it and watch [`ScanCoordinator::is_busy`]
/// instead.
#[derive(Debug)]
pub struct BatchStarted {
    /// When the batch was accepted.
    pub started: DateTime<Utc>,

    /// Completion handle for the background batch task.
    pub handle: JoinHandle<()>,
}

/// Serializes scans over a shared [`DiskRegistry`].
///
/// Cloning is cheap; all clones share the same registry, scanner, and busy
/// flag, so the at-most-one-scan invariant holds across handlers and
/// background tasks.
#[derive(Clone)]
pub struct ScanCoordinator {
    registry: Arc<DiskRegistry>,
    scanner: Arc<dyn Scan>,
    busy: Arc<AtomicBool>,
}

impl std::fmt::Debug for ScanCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanCoordinator")
            .field("registry", &self.registry)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl ScanCoordinator {
    /// Creates a coordinator over the given registry and scanner, idle.
    #[must_use]
    pub fn new(registry: Arc<DiskRegistry>, scanner: Arc<dyn Scan>) -> Self {
        Self {
            registry,
            scanner,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the registry this coordinator writes to.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &DiskRegistry {
        &self.registry
    }

    /// Returns `true` while a scan operation holds the busy flag.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Returns the current status: busy flag plus configured disk names.
    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            running: self.is_busy(),
            disks: self.registry.names(),
        }
    }

    /// Scans a single disk and returns its updated record.
    ///
    /// # Errors
    ///
    /// - [`ScanRequestError::Busy`] when another scan is in flight. The
    ///   check happens twice: a cheap load up front, then the indivisible
    ///   claim; losing either way is the same rejection.
    /// - [`ScanRequestError::UnknownDisk`] for unconfigured names; the busy
    ///   flag is never touched in this case.
    /// - [`ScanRequestError::ScanFailed`] when traversal fails; the disk's
    ///   content has been cleared and its timestamp set by then.
    pub async fn scan_one(&self, name: &str) -> Result<DiskRecord, ScanRequestError> {
        if self.is_busy() {
            return Err(ScanRequestError::Busy);
        }

        let root = self
            .registry
            .path_of(name)
            .ok_or_else(|| ScanRequestError::unknown_disk(name))?;

        let permit =
            ScanPermit::acquire(Arc::clone(&self.busy)).ok_or(ScanRequestError::Busy)?;
        let result = self.run_scan(name, root).await;
        drop(permit);
        result
    }

    /// Starts a background scan of every configured disk.
    ///
    /// The batch claims the busy flag synchronously and holds it for its
    /// whole duration; disks are scanned sequentially in configuration
    /// order. Per-disk failures are logged and the batch continues.
    ///
    /// # Errors
    ///
    /// Returns [`ScanRequestError::Busy`] if a scan is already in flight.
    pub fn scan_all(&self) -> Result<BatchStarted, ScanRequestError> {
        let permit =
            ScanPermit::acquire(Arc::clone(&self.busy)).ok_or(ScanRequestError::Busy)?;

        let started = Utc::now();
        let names = self.registry.names();
        let coordinator = self.clone();

        info!(disk_count = names.len(), "batch scan started");
        let handle = tokio::spawn(async move {
            let _permit = permit;
            for name in &names {
                let Some(root) = coordinator.registry.path_of(name) else {
                    continue;
                };
                if let Err(error) = coordinator.run_scan(name, root).await {
                    warn!(disk = %name, %error, "batch scan failed for disk, continuing");
                }
            }
            info!(disk_count = names.len(), "batch scan complete");
        });

        Ok(BatchStarted { started, handle })
    }

    /// Returns a disk's record, scanning it first if it has no content.
    ///
    /// Lazy population: an unscanned disk is scanned on first read. If that
    /// scan fails or loses the busy-flag race, the current registry state is
    /// served as-is; the read never fails because a scan could not run.
    ///
    /// # Errors
    ///
    /// Returns [`ScanRequestError::UnknownDisk`] for unconfigured names.
    pub async fn get_disk(&self, name: &str) -> Result<DiskRecord, ScanRequestError> {
        let record = self
            .registry
            .get(name)
            .ok_or_else(|| ScanRequestError::unknown_disk(name))?;

        if !record.is_unscanned() {
            return Ok(record);
        }

        match self.scan_one(name).await {
            Ok(fresh) => Ok(fresh),
            Err(error) => {
                debug!(disk = %name, %error, "lazy scan did not complete, serving cached state");
                self.registry
                    .get(name)
                    .ok_or_else(|| ScanRequestError::unknown_disk(name))
            }
        }
    }

    /// Runs one traversal on the blocking pool and stores its outcome.
    ///
    /// Does not touch the busy flag; callers hold a [`ScanPermit`].
    async fn run_scan(
        &self,
        name: &str,
        root: Utf8PathBuf,
    ) -> Result<DiskRecord, ScanRequestError> {
        info!(disk = %name, root = %root, "scan started");

        let scanner = Arc::clone(&self.scanner);
        let outcome = task::spawn_blocking(move || scanner.scan(&root)).await?;
        let finished = Utc::now();

        match outcome {
            Ok(entries) => {
                debug!(disk = %name, entry_count = entries.len(), "scan finished");
                self.registry
                    .set_result(name, entries, finished)
                    .ok_or_else(|| ScanRequestError::unknown_disk(name))
            }
            Err(source) => {
                warn!(disk = %name, error = %source, "scan failed, clearing cached content");
                self.registry.set_result(name, Vec::new(), finished);
                Err(ScanRequestError::scan_failed(name, source))
            }
        }
    }
}
