use crate::config::AppConfig;
use crate::error::StoreError;
use crate::persistence::PersistenceAdapter;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::attachment::AttachmentRef;

/// Actix web handler for `GET /api/admin/attachments/{owner}/{file}`.
///
/// Serves a stored PDF back out. The two path segments mirror how attachments
/// are laid out on disk, one directory per submission row.
pub async fn process(
    config: web::Data<AppConfig>,
    store: web::Data<dyn PersistenceAdapter>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> impl Responder {
    if let Err(denied) = super::check_password(&config, &req) {
        return denied;
    }

    let (owner, file) = path.into_inner();
    let wanted = AttachmentRef {
        name: file.clone(),
        location: format!("{}/{}", owner, file),
    };

    match store.resolve_attachment(&wanted) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                format!("inline; filename=\"{}\"", file),
            ))
            .body(bytes),
        Err(StoreError::NotFound(_)) => HttpResponse::NotFound().body("Attachment not found"),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
