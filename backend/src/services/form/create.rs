use crate::session::{FormSession, SessionsState};
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

/// Actix web handler for `POST /api/form/session`.
///
/// Creates a fresh session with one blank row per section and returns the
/// session id along with the initial rows.
pub async fn process(state: web::Data<SessionsState>) -> impl Responder {
    let session_id = Uuid::new_v4().to_string();
    let session = FormSession::new();
    let body = serde_json::json!({
        "session_id": session_id,
        "sections": session.rows_by_section(),
    });
    state.sessions.write().await.insert(session_id, session);
    HttpResponse::Ok().json(body)
}
