use crate::session::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use common::model::section::SectionKind;

/// Actix web handler for
/// `DELETE /api/form/{session_id}/attachments/{section}/{row_id}/{slot}`.
///
/// Explicitly clears a cached upload, e.g. when the user picks the wrong file.
pub async fn process(
    state: web::Data<SessionsState>,
    path: web::Path<(String, String, String, String)>,
) -> impl Responder {
    let (session_id, section_key, row_id, slot) = path.into_inner();
    if SectionKind::from_key(&section_key).is_none() {
        return HttpResponse::NotFound().body("Unknown section");
    }

    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&session_id) else {
        return HttpResponse::NotFound().body("Session not found");
    };
    let removed = session.attachments.clear(&row_id, &slot);
    HttpResponse::Ok().json(serde_json::json!({ "removed": removed }))
}
