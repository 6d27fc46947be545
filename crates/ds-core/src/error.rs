//! Error types for the ds-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration failures
//! that should stop startup. Note that malformed disks JSON is not one of
//! them: the disk set degrades to empty by policy (see
//! [`DisksConfig::parse`](crate::DisksConfig::parse)).

/// Errors that can occur while assembling the server configuration.
///
/// # Examples
///
/// ```
/// use ds_core::ConfigError;
///
/// let error = ConfigError::invalid_option("host", "must not be empty");
/// assert!(error.to_string().contains("host"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The listen address could not be parsed.
    #[error("invalid listen address '{addr}': {source}")]
    InvalidListenAddr {
        /// The address string that failed to parse.
        addr: String,
        /// The underlying parse error.
        #[source]
        source: std::net::AddrParseError,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_listen_addr_display() {
        let source = "nonsense".parse::<std::net::SocketAddr>().unwrap_err();
        let error = ConfigError::InvalidListenAddr {
            addr: "nonsense".to_owned(),
            source,
        };
        assert!(error.to_string().contains("nonsense"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("host", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("host"));
        assert!(msg.contains("must not be empty"));
    }
}
