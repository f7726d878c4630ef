use crate::session::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use common::model::section::SectionKind;

/// Actix web handler for `POST /api/form/{session_id}/rows/{section}`.
///
/// Appends a blank row with a fresh identifier and returns it.
pub async fn process(
    state: web::Data<SessionsState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (session_id, section_key) = path.into_inner();
    let Some(kind) = SectionKind::from_key(&section_key) else {
        return HttpResponse::NotFound().body("Unknown section");
    };

    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(&session_id) {
        Some(session) => HttpResponse::Ok().json(session.rows.add(kind)),
        None => HttpResponse::NotFound().body("Session not found"),
    }
}
