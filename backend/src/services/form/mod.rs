//! # Form Session Service
//!
//! API endpoints for the in-progress form: sessions, repeating-section rows and
//! cached PDF uploads. Nothing here touches durable storage; everything lives
//! in the session's `RowStore` and `AttachmentCache` until submit.
//!
//! ## Registered routes
//!
//! *   **`POST /session`** — create a session; every section starts with one
//!     blank row. Returns the session id and the initial rows.
//! *   **`GET /{session_id}`** — current rows per section.
//! *   **`POST /{session_id}/rows/{section}`** — append a blank row.
//! *   **`PUT /{session_id}/rows/{section}/{row_id}`** — bind field values;
//!     safe to re-send on every widget interaction.
//! *   **`DELETE /{session_id}/rows/{section}/{row_id}`** — remove a row
//!     (no-op at the one-row floor) and drop its cached uploads.
//! *   **`POST /{session_id}/attachments/{section}/{row_id}/{slot}`** —
//!     multipart PDF into the attachment cache.
//! *   **`DELETE /{session_id}/attachments/{section}/{row_id}/{slot}`** —
//!     clear a cached upload.

mod add_row;
mod clear_upload;
mod create;
mod get;
mod remove_row;
mod update_row;
mod upload;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/form";

/// Configures and returns the Actix scope for form session routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/session", post().to(create::process))
        .route("/{session_id}", get().to(self::get::process))
        .route("/{session_id}/rows/{section}", post().to(add_row::process))
        .route(
            "/{session_id}/rows/{section}/{row_id}",
            put().to(update_row::process),
        )
        .route(
            "/{session_id}/rows/{section}/{row_id}",
            delete().to(remove_row::process),
        )
        .route(
            "/{session_id}/attachments/{section}/{row_id}/{slot}",
            post().to(upload::process),
        )
        .route(
            "/{session_id}/attachments/{section}/{row_id}/{slot}",
            delete().to(clear_upload::process),
        )
}
