//! Configuration structures for the disk-scan service.
//!
//! This module provides configuration types for the server:
//!
//! - [`DiskConfig`] - a single disk's settings (its root path)
//! - [`DisksConfig`] - the named disk set, parsed from `DISKS_JSON`
//! - [`ServerConfig`] - root configuration combining host, listen address,
//!   and disks
//!
//! Disk parsing is fail-soft by policy: malformed `DISKS_JSON` yields an
//! empty disk set rather than a startup failure. A service with no disks
//! still answers `/status`.

use std::net::SocketAddr;

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Host name reported in responses when `HOST_NAME` is unset.
pub const DEFAULT_HOST: &str = "unknown-host";

/// Default listen address for the HTTP server.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Configuration for a single disk.
///
/// # Examples
///
/// ```
/// use ds_core::DiskConfig;
///
/// let config: DiskConfig = serde_json::from_str(r#"{"path": "/mnt/media"}"#).unwrap();
/// assert_eq!(config.path, "/mnt/media");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskConfig {
    /// Root directory of the disk.
    pub path: Utf8PathBuf,
}

/// The configured disk set, in configuration order.
///
/// Backed by an [`IndexMap`] so `/status` and `scan-all` iterate disks in
/// the order the operator wrote them.
///
/// # Examples
///
/// ```
/// use ds_core::DisksConfig;
///
/// let disks = DisksConfig::parse(r#"{"a": {"path": "/mnt/a"}, "b": {"path": "/mnt/b"}}"#);
/// assert_eq!(disks.names().collect::<Vec<_>>(), vec!["a", "b"]);
///
/// // Malformed input degrades to an empty set, never an error.
/// let empty = DisksConfig::parse("not json");
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisksConfig {
    disks: IndexMap<String, DiskConfig>,
}

impl DisksConfig {
    /// Parses a `DISKS_JSON` blob into a disk set.
    ///
    /// Expects a JSON object mapping disk name to `{"path": ...}`.
    /// Malformed input is logged and degrades to an empty set; this is a
    /// deliberate policy, not an oversight. The process must come up even
    /// when the environment is misconfigured.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<IndexMap<String, DiskConfig>>(raw) {
            Ok(disks) => Self { disks },
            Err(error) => {
                warn!(%error, "malformed disks JSON, starting with an empty disk set");
                Self::default()
            }
        }
    }

    /// Returns the configured disk names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.disks.keys().map(String::as_str)
    }

    /// Iterates `(name, config)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiskConfig)> {
        self.disks.iter().map(|(name, disk)| (name.as_str(), disk))
    }

    /// Returns the number of configured disks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Returns `true` if no disks are configured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }
}

impl FromIterator<(String, DiskConfig)> for DisksConfig {
    fn from_iter<T: IntoIterator<Item = (String, DiskConfig)>>(iter: T) -> Self {
        Self {
            disks: iter.into_iter().collect(),
        }
    }
}

/// Root configuration for the disk-scan server.
///
/// Constructed by the binary from CLI flags and their environment-variable
/// mirrors (`HOST_NAME`, `DISKS_JSON`, `LISTEN_ADDR`), then handed to the
/// application context. Never read from a hidden global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name reported in every response.
    pub host: String,

    /// Address the HTTP server binds to.
    pub listen: SocketAddr,

    /// The configured disk set.
    pub disks: DisksConfig,
}

impl ServerConfig {
    /// Assembles the server configuration from raw startup inputs.
    ///
    /// `disks_raw` goes through the fail-soft [`DisksConfig::parse`]; the
    /// host and listen address are validated strictly since a bad bind
    /// address cannot be degraded around.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for an empty host and
    /// [`ConfigError::InvalidListenAddr`] for an unparseable address.
    pub fn from_raw(host: &str, listen: &str, disks_raw: &str) -> Result<Self, ConfigError> {
        if host.is_empty() {
            return Err(ConfigError::invalid_option("host", "must not be empty"));
        }

        let listen = listen
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddr {
                addr: listen.to_owned(),
                source,
            })?;

        Ok(Self {
            host: host.to_owned(),
            listen,
            disks: DisksConfig::parse(disks_raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_disks_in_order() {
        let disks = DisksConfig::parse(
            r#"{"media": {"path": "/mnt/media"}, "backup": {"path": "/mnt/backup"}}"#,
        );
        assert_eq!(disks.len(), 2);
        assert_eq!(disks.names().collect::<Vec<_>>(), vec!["media", "backup"]);
        let paths: Vec<_> = disks.iter().map(|(_, d)| d.path.as_str()).collect();
        assert_eq!(paths, vec!["/mnt/media", "/mnt/backup"]);
    }

    #[test]
    fn test_parse_empty_object() {
        let disks = DisksConfig::parse("{}");
        assert!(disks.is_empty());
    }

    #[test]
    fn test_parse_malformed_json_degrades_to_empty() {
        assert!(DisksConfig::parse("not json at all").is_empty());
        assert!(DisksConfig::parse(r#"{"a": {"path""#).is_empty());
    }

    #[test]
    fn test_parse_wrong_shape_degrades_to_empty() {
        // A JSON array is valid JSON but not a disk map.
        assert!(DisksConfig::parse(r#"["a", "b"]"#).is_empty());
        // A disk without a path is rejected wholesale.
        assert!(DisksConfig::parse(r#"{"a": {}}"#).is_empty());
    }

    #[test]
    fn test_disks_config_serialization_round_trip() {
        let disks = DisksConfig::parse(r#"{"a": {"path": "/mnt/a"}}"#);
        let json = serde_json::to_string(&disks).unwrap();
        let parsed: DisksConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(disks, parsed);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_HOST, "unknown-host");
        let addr: SocketAddr = DEFAULT_LISTEN_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_from_raw_accepts_defaults() {
        let config =
            ServerConfig::from_raw(DEFAULT_HOST, DEFAULT_LISTEN_ADDR, r#"{"a": {"path": "/a"}}"#)
                .unwrap();
        assert_eq!(config.host, "unknown-host");
        assert_eq!(config.disks.len(), 1);
    }

    #[test]
    fn test_from_raw_rejects_empty_host() {
        let err = ServerConfig::from_raw("", DEFAULT_LISTEN_ADDR, "{}").unwrap_err();
        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn test_from_raw_rejects_bad_listen_addr() {
        let err = ServerConfig::from_raw("h", "not-an-addr", "{}").unwrap_err();
        assert!(err.to_string().contains("not-an-addr"));
    }

    #[test]
    fn test_from_raw_keeps_disks_fail_soft() {
        let config = ServerConfig::from_raw("h", DEFAULT_LISTEN_ADDR, "garbage").unwrap();
        assert!(config.disks.is_empty());
    }
}
