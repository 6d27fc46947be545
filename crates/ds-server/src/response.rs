//! JSON response bodies for the HTTP surface.
//!
//! Every body here is pure formatting over current registry state; nothing
//! in this module reads locks or triggers scans. All endpoints answer
//! HTTP 200 with one of these shapes, errors included.

use chrono::{DateTime, Utc};
use ds_core::{DiskRecord, Entry};
use serde::{Deserialize, Serialize};

use crate::coordinator::StatusSnapshot;
use crate::error::ScanRequestError;

/// A disk's cached listing, as returned by `/scan/{disk}` and `/disk/{disk}`.
///
/// `date` is `null` for a disk that has never been scanned; `content` is
/// empty in that case and also after a failed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskResponse {
    /// Host name this server reports as.
    pub host: String,

    /// The disk's configured name.
    pub disk: String,

    /// Root directory the disk maps to.
    pub path: String,

    /// When the disk was last scanned.
    pub date: Option<DateTime<Utc>>,

    /// Entries from the most recent scan.
    pub content: Vec<Entry>,
}

impl DiskResponse {
    /// Builds the response from a registry record.
    #[must_use]
    pub fn from_record(host: impl Into<String>, record: DiskRecord) -> Self {
        Self {
            host: host.into(),
            disk: record.name,
            path: record.path.into_string(),
            date: record.last_scan,
            content: record.content,
        }
    }
}

/// The `/status` body: host, busy flag, and configured disk names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Host name this server reports as.
    pub host: String,

    /// Whether a scan is currently in flight.
    pub running: bool,

    /// Configured disk names in configuration order.
    pub disks: Vec<String>,
}

impl StatusResponse {
    /// Builds the response from a coordinator snapshot.
    #[must_use]
    pub fn from_snapshot(host: impl Into<String>, snapshot: StatusSnapshot) -> Self {
        Self {
            host: host.into(),
            running: snapshot.running,
            disks: snapshot.disks,
        }
    }
}

/// The `/scan-all` acknowledgement: the batch was accepted and detached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanAllResponse {
    /// Always `"OK"`; the batch outcome is observed via `/status`.
    pub status: String,

    /// When the batch was accepted.
    pub started: DateTime<Utc>,
}

impl ScanAllResponse {
    /// Builds the acknowledgement for an accepted batch.
    #[must_use]
    pub fn new(started: DateTime<Utc>) -> Self {
        Self {
            status: "OK".to_owned(),
            started,
        }
    }
}

/// A request-level failure, still delivered with HTTP 200.
///
/// `exception` carries underlying failure detail when there is any and is
/// omitted from the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of what was rejected.
    pub error: String,

    /// Underlying failure detail, when a scan actually ran and failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl ErrorBody {
    /// Creates an error body with no exception detail.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            exception: None,
        }
    }
}

impl From<&ScanRequestError> for ErrorBody {
    fn from(error: &ScanRequestError) -> Self {
        match error {
            ScanRequestError::ScanFailed { source, .. } => Self {
                error: error.to_string(),
                exception: Some(source.to_string()),
            },
            ScanRequestError::Task(source) => Self {
                error: error.to_string(),
                exception: Some(source.to_string()),
            },
            ScanRequestError::Busy | ScanRequestError::UnknownDisk(_) => {
                Self::new(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use ds_scanner::ScanError;

    #[test]
    fn test_disk_response_from_unscanned_record() {
        let record = DiskRecord::new("a", Utf8PathBuf::from("/mnt/a"));
        let response = DiskResponse::from_record("host-1", record);

        assert_eq!(response.host, "host-1");
        assert_eq!(response.disk, "a");
        assert_eq!(response.path, "/mnt/a");
        assert!(response.date.is_none());
        assert!(response.content.is_empty());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["date"].is_null());
    }

    #[test]
    fn test_disk_response_carries_content() {
        let mut record = DiskRecord::new("a", Utf8PathBuf::from("/mnt/a"));
        record.content = vec![Entry::new(Utf8PathBuf::from("f1"), 3)];
        record.last_scan = Some(Utc::now());

        let response = DiskResponse::from_record("h", record);
        assert_eq!(response.content.len(), 1);
        assert!(response.date.is_some());
    }

    #[test]
    fn test_scan_all_response_status_is_ok() {
        let response = ScanAllResponse::new(Utc::now());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "OK");
        assert!(json["started"].is_string());
    }

    #[test]
    fn test_error_body_omits_absent_exception() {
        let body = ErrorBody::from(&ScanRequestError::Busy);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["error"].as_str().is_some());
        assert!(json.get("exception").is_none());
    }

    #[test]
    fn test_error_body_includes_scan_failure_detail() {
        let error = ScanRequestError::scan_failed(
            "a",
            ScanError::RootMissing(Utf8PathBuf::from("/mnt/a")),
        );
        let body = ErrorBody::from(&error);
        assert!(body.error.contains("'a'"));
        assert!(body.exception.is_some_and(|e| e.contains("/mnt/a")));
    }
}
