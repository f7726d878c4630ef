//! # Submission Service
//!
//! The single endpoint that turns an in-progress form session into a durable
//! submission.
//!
//! ## Registered routes
//!
//! *   **`POST /{session_id}`**:
//!     - **Handler**: `submit::process`
//!     - **Description**: Takes the top-level fields plus the per-section
//!       toggle and confirmation state as a JSON payload, snapshots the
//!       session's rows and cached uploads, and runs the submission
//!       orchestrator. On success the session is dropped and the receipt
//!       (submission id + timestamp) is returned. Validation failures come
//!       back as `400` with the full error list; storage schema mismatches as
//!       `409`; partial persistence failures as `502` with the reconciliation
//!       context.

mod submit;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/submissions";

/// Configures and returns the Actix scope for submission routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{session_id}", post().to(submit::process))
}
