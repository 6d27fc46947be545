//! Core types, errors, and configuration for the disk-scan service.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`ServerConfig`] and [`DisksConfig`] - startup configuration with
//!   fail-soft disk parsing
//! - [`DiskRecord`] and [`Entry`] - the in-memory scan cache model
//! - [`ConfigError`] - configuration-level failures

#![deny(clippy::all)]
#![warn(missing_docs)]

mod config;
mod disk;
mod error;

pub use config::{DiskConfig, DisksConfig, ServerConfig, DEFAULT_HOST, DEFAULT_LISTEN_ADDR};
pub use disk::{DiskRecord, Entry};
pub use error::ConfigError;
