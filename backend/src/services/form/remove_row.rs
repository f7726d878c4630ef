use crate::session::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use common::model::section::SectionKind;

/// Actix web handler for `DELETE /api/form/{session_id}/rows/{section}/{row_id}`.
///
/// Removes the row unless it is the last one in its section. When a row goes,
/// its cached uploads go with it so a later row can never silently pick up a
/// stale attachment.
pub async fn process(
    state: web::Data<SessionsState>,
    path: web::Path<(String, String, String)>,
) -> impl Responder {
    let (session_id, section_key, row_id) = path.into_inner();
    let Some(kind) = SectionKind::from_key(&section_key) else {
        return HttpResponse::NotFound().body("Unknown section");
    };

    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&session_id) else {
        return HttpResponse::NotFound().body("Session not found");
    };
    let removed = session.rows.remove(kind, &row_id);
    if removed {
        session.attachments.clear_row(&row_id);
    }
    HttpResponse::Ok().json(serde_json::json!({ "removed": removed }))
}
