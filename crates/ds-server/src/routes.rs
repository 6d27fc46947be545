//! HTTP routes for the disk-scan service.
//!
//! Four GET endpoints, all JSON, all HTTP 200 even on rejection. Clients
//! distinguish outcomes by body shape (`error` key present or not), not by
//! status code.
//!
//! | Route          | Behavior                                            |
//! |----------------|-----------------------------------------------------|
//! | `/status`      | Host, busy flag, configured disk names              |
//! | `/scan/{disk}` | Synchronous scan of one disk                        |
//! | `/disk/{disk}` | Cached listing, scanning first if never scanned     |
//! | `/scan-all`    | Detached background scan of every disk              |

use axum::Router;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use tracing::debug;

use crate::context::AppContext;
use crate::response::{DiskResponse, ErrorBody, ScanAllResponse, StatusResponse};

/// Builds the application router over the given context.
#[must_use]
pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/scan/{disk}", get(scan_disk))
        .route("/disk/{disk}", get(get_disk))
        .route("/scan-all", get(scan_all))
        .with_state(context)
}

/// `GET /status` - current busy flag and disk names. Valid mid-scan.
async fn status(State(context): State<AppContext>) -> Json<StatusResponse> {
    let snapshot = context.coordinator.status();
    Json(StatusResponse::from_snapshot(context.host, snapshot))
}

/// `GET /scan/{disk}` - scan one disk now and return its fresh listing.
async fn scan_disk(State(context): State<AppContext>, Path(disk): Path<String>) -> Response {
    debug!(disk = %disk, "scan requested");
    match context.coordinator.scan_one(&disk).await {
        Ok(record) => Json(DiskResponse::from_record(context.host, record)).into_response(),
        Err(error) => Json(ErrorBody::from(&error)).into_response(),
    }
}

/// `GET /disk/{disk}` - cached listing, lazily scanning an unscanned disk.
async fn get_disk(State(context): State<AppContext>, Path(disk): Path<String>) -> Response {
    debug!(disk = %disk, "disk listing requested");
    match context.coordinator.get_disk(&disk).await {
        Ok(record) => Json(DiskResponse::from_record(context.host, record)).into_response(),
        Err(error) => Json(ErrorBody::from(&error)).into_response(),
    }
}

/// `GET /scan-all` - start a background scan of every disk.
async fn scan_all(State(context): State<AppContext>) -> Response {
    match context.coordinator.scan_all() {
        Ok(batch) => {
            // Detached on purpose; completion is observed via /status.
            drop(batch.handle);
            Json(ScanAllResponse::new(batch.started)).into_response()
        }
        Err(error) => Json(ErrorBody::from(&error)).into_response(),
    }
}
