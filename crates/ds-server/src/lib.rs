//! Disk-scan HTTP service: registry, coordinator, and routes.
//!
//! This crate ties the workspace together into the running service:
//!
//! - [`DiskRegistry`] - named disks and their cached scan results
//! - [`ScanCoordinator`] - the process-wide busy flag and all scan execution
//! - [`AppContext`] - shared state injected into handlers
//! - [`router`] - the axum routing table
//!
//! # Architecture
//!
//! ```text
//! HTTP request -> router -> AppContext
//!                              |-> ScanCoordinator -- busy flag (AtomicBool)
//!                              |       |-> Scan impl (blocking pool)
//!                              |       `-> DiskRegistry (RwLock, clone-on-read)
//!                              `-> response builders (pure formatting)
//! ```
//!
//! At most one scan runs at a time across the whole process. Reads never
//! block behind a scan; they serve the registry's current state.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod context;
mod coordinator;
mod error;
mod registry;
mod response;
mod routes;

pub use context::AppContext;
pub use coordinator::{BatchStarted, ScanCoordinator, StatusSnapshot};
pub use error::ScanRequestError;
pub use registry::DiskRegistry;
pub use response::{DiskResponse, ErrorBody, ScanAllResponse, StatusResponse};
pub use routes::router;
