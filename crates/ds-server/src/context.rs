//! Shared application state injected into route handlers.

use std::sync::Arc;

use ds_core::ServerConfig;
use ds_scanner::Scan;

use crate::coordinator::ScanCoordinator;
use crate::registry::DiskRegistry;

/// Shared state handed to every handler via `axum::extract::State`.
///
/// Built once in `main` from the parsed configuration and never mutated
/// structurally afterwards; all run-time mutation happens inside the
/// coordinator and its registry. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Host name reported in every response.
    pub host: String,

    /// The scan coordinator, sole writer of disk state.
    pub coordinator: ScanCoordinator,
}

impl AppContext {
    /// Assembles the context from configuration and a scanner.
    ///
    /// The scanner is injected rather than constructed here so tests can
    /// substitute instrumented implementations.
    #[must_use]
    pub fn new(config: &ServerConfig, scanner: Arc<dyn Scan>) -> Self {
        let registry = Arc::new(DiskRegistry::from_config(&config.disks));
        Self {
            host: config.host.clone(),
            coordinator: ScanCoordinator::new(registry, scanner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use ds_core::{DEFAULT_LISTEN_ADDR, Entry};
    use ds_scanner::ScanError;

    struct NoopScanner;

    impl Scan for NoopScanner {
        fn scan(&self, _root: &Utf8Path) -> Result<Vec<Entry>, ScanError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_context_from_config() {
        let config = ServerConfig::from_raw(
            "host-1",
            DEFAULT_LISTEN_ADDR,
            r#"{"a": {"path": "/mnt/a"}}"#,
        )
        .unwrap();

        let context = AppContext::new(&config, Arc::new(NoopScanner));
        assert_eq!(context.host, "host-1");
        assert_eq!(context.coordinator.registry().names(), vec!["a"]);
        assert!(!context.coordinator.is_busy());
    }
}
