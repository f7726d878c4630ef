use crate::config::AppConfig;
use crate::persistence::PersistenceAdapter;
use crate::schema;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::section::SectionKind;
use serde_json::json;

/// Actix web handler for `GET /api/admin/export`.
///
/// Returns every stored table in one JSON document keyed by table name, each
/// entry carrying its column list and data rows.
pub async fn process(
    config: web::Data<AppConfig>,
    store: web::Data<dyn PersistenceAdapter>,
    req: HttpRequest,
) -> impl Responder {
    if let Err(denied) = super::check_password(&config, &req) {
        return denied;
    }

    let mut tables = serde_json::Map::new();
    let mut names = vec![schema::HEADER_TABLE];
    names.extend(SectionKind::ALL.iter().map(|kind| kind.key()));

    for name in names {
        let columns = match schema::columns_for_table(name) {
            Some(columns) => columns,
            None => continue,
        };
        match store.read_all(name) {
            Ok(rows) => {
                tables.insert(name.to_string(), json!({ "columns": columns, "rows": rows }));
            }
            Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
        }
    }

    HttpResponse::Ok().json(json!({ "tables": tables }))
}
