use crate::session::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use common::model::section::SectionKind;
use common::requests::UpdateRowRequest;

/// Actix web handler for `PUT /api/form/{session_id}/rows/{section}/{row_id}`.
///
/// Overwrites the given field values on one row. The whole widget state may be
/// re-sent on every interaction; unknown fields are ignored and the row id
/// keeps the binding stable across re-renders.
pub async fn process(
    state: web::Data<SessionsState>,
    path: web::Path<(String, String, String)>,
    payload: web::Json<UpdateRowRequest>,
) -> impl Responder {
    let (session_id, section_key, row_id) = path.into_inner();
    let Some(kind) = SectionKind::from_key(&section_key) else {
        return HttpResponse::NotFound().body("Unknown section");
    };

    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&session_id) else {
        return HttpResponse::NotFound().body("Session not found");
    };
    if session.rows.update(kind, &row_id, payload.into_inner().values) {
        HttpResponse::Ok().json(serde_json::json!({ "updated": true }))
    } else {
        HttpResponse::NotFound().body("Row not found")
    }
}
