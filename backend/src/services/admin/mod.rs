//! # Admin Service
//!
//! Read-only reporting over everything that has been submitted. Every route is
//! gated by the shared passphrase, supplied in an `x-admin-password` header
//! and compared against the configured value. When no passphrase is
//! configured the whole surface stays disabled.
//!
//! ## Registered routes
//!
//! *   **`GET /summary`**:
//!     - **Handler**: `summary::process`
//!     - **Description**: Submission count plus a per-section row count.
//!
//! *   **`GET /tables/{table}.csv`**:
//!     - **Handler**: `tables::process`
//!     - **Description**: One stored table as CSV, columns in storage order.
//!
//! *   **`GET /export`**:
//!     - **Handler**: `export::process`
//!     - **Description**: Every table in one JSON document, for tooling that
//!       wants the whole dataset in a single request.
//!
//! *   **`GET /attachments/{owner}/{file}`**:
//!     - **Handler**: `attachment::process`
//!     - **Description**: Streams a stored PDF back out.

mod attachment;
mod export;
mod summary;
mod tables;

use crate::config::AppConfig;
use actix_web::web::{get, scope};
use actix_web::{HttpRequest, HttpResponse, Scope};

const API_PATH: &str = "/api/admin";

/// Checks the shared passphrase on an incoming admin request. Returns the
/// response to send instead of the payload when access is denied.
pub(crate) fn check_password(config: &AppConfig, req: &HttpRequest) -> Result<(), HttpResponse> {
    if config.admin_password.is_empty() {
        return Err(HttpResponse::Forbidden().body("Admin access is disabled"));
    }
    let supplied = req
        .headers()
        .get("x-admin-password")
        .and_then(|value| value.to_str().ok());
    if supplied == Some(config.admin_password.as_str()) {
        Ok(())
    } else {
        Err(HttpResponse::Unauthorized().body("Wrong admin password"))
    }
}

/// Configures and returns the Actix scope for admin routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/summary", get().to(summary::process))
        .route("/tables/{table}.csv", get().to(tables::process))
        .route("/export", get().to(export::process))
        .route("/attachments/{owner}/{file}", get().to(attachment::process))
}
