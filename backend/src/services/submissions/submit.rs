use crate::error::SubmitError;
use crate::form::FormSnapshot;
use crate::persistence::PersistenceAdapter;
use crate::session::SessionsState;
use crate::submit as orchestrator;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SubmitFormRequest;
use log::warn;

/// Actix web handler for `POST /api/submissions/{session_id}`.
///
/// The session's rows and attachment cache are snapshotted under the write
/// lock, so a submit sees one consistent form state. The session is only
/// dropped on success; after a validation failure the cached uploads are still
/// there for the retry.
pub async fn process(
    sessions: web::Data<SessionsState>,
    store: web::Data<dyn PersistenceAdapter>,
    session_id: web::Path<String>,
    payload: web::Json<SubmitFormRequest>,
) -> impl Responder {
    let mut guard = sessions.sessions.write().await;
    let result = match guard.get(session_id.as_str()) {
        None => return HttpResponse::NotFound().body("Session not found"),
        Some(session) => {
            let snapshot = FormSnapshot {
                request: payload.into_inner(),
                rows: session.rows.snapshot(),
            };
            orchestrator::submit(&snapshot, &session.attachments, store.get_ref())
        }
    };

    match result {
        Ok(receipt) => {
            guard.remove(session_id.as_str());
            HttpResponse::Ok().json(receipt)
        }
        Err(SubmitError::Validation(errors)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }))
        }
        Err(SubmitError::Schema(detail)) => {
            warn!("submit blocked by storage schema mismatch: {}", detail);
            HttpResponse::Conflict().json(serde_json::json!({ "error": detail }))
        }
        Err(SubmitError::Persistence(failure)) => {
            warn!(
                "partial submission {}: {} ({})",
                failure.submission_id, failure.context, failure.source
            );
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Submission was only partially persisted; quote the submission id to support.",
                "submission_id": failure.submission_id,
                "section": failure.section.map(|kind| kind.key()),
                "row": failure.row_index,
                "context": failure.context,
                "stored_attachments": failure.stored,
                "cause": failure.source.to_string(),
            }))
        }
    }
}
