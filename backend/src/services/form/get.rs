use crate::session::SessionsState;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/form/{session_id}`.
pub async fn process(
    state: web::Data<SessionsState>,
    session_id: web::Path<String>,
) -> impl Responder {
    let sessions = state.sessions.read().await;
    match sessions.get(session_id.as_str()) {
        Some(session) => HttpResponse::Ok().json(serde_json::json!({
            "sections": session.rows_by_section(),
        })),
        None => HttpResponse::NotFound().body("Session not found"),
    }
}
