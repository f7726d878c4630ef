use crate::config::AppConfig;
use crate::persistence::PersistenceAdapter;
use crate::schema;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::section::SectionKind;
use serde_json::json;

/// Actix web handler for `GET /api/admin/summary`.
///
/// Reports how many submissions exist and how many rows each section table
/// holds. Tables that have never been written count as zero.
pub async fn process(
    config: web::Data<AppConfig>,
    store: web::Data<dyn PersistenceAdapter>,
    req: HttpRequest,
) -> impl Responder {
    if let Err(denied) = super::check_password(&config, &req) {
        return denied;
    }

    let submissions = match store.read_all(schema::HEADER_TABLE) {
        Ok(rows) => rows.len(),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    let mut sections = serde_json::Map::new();
    for kind in SectionKind::ALL {
        match store.read_all(kind.key()) {
            Ok(rows) => {
                sections.insert(kind.key().to_string(), json!(rows.len()));
            }
            Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
        }
    }

    HttpResponse::Ok().json(json!({
        "submissions": submissions,
        "sections": sections,
    }))
}
