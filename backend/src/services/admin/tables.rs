use crate::config::AppConfig;
use crate::persistence::PersistenceAdapter;
use crate::schema;
use actix_web::{web, HttpRequest, HttpResponse, Responder};

fn to_csv(columns: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns).map_err(|e| e.to_string())?;
    for row in rows {
        writer.write_record(row).map_err(|e| e.to_string())?;
    }
    writer.into_inner().map_err(|e| e.to_string())
}

/// Actix web handler for `GET /api/admin/tables/{table}.csv`.
///
/// Dumps one stored table as CSV with the columns in storage order, so the
/// export is stable across requests regardless of what has been submitted.
pub async fn process(
    config: web::Data<AppConfig>,
    store: web::Data<dyn PersistenceAdapter>,
    table: web::Path<String>,
    req: HttpRequest,
) -> impl Responder {
    if let Err(denied) = super::check_password(&config, &req) {
        return denied;
    }

    let table = table.into_inner();
    let Some(columns) = schema::columns_for_table(&table) else {
        return HttpResponse::NotFound().body("Unknown table");
    };

    let rows = match store.read_all(&table) {
        Ok(rows) => rows,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    match to_csv(&columns, &rows) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}.csv\"", table),
            ))
            .body(bytes),
        Err(e) => HttpResponse::InternalServerError().body(e),
    }
}
