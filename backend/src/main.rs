use actix_web::{web, App, HttpServer};
use backend::config::AppConfig;
use backend::persistence::sqlite::SqliteStore;
use backend::persistence::PersistenceAdapter;
use backend::services;
use backend::session::SessionsState;
use env_logger::Env;
use log::info;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let store: Arc<dyn PersistenceAdapter> =
        Arc::new(SqliteStore::new(&config.db_path, &config.files_dir));
    let store_data: web::Data<dyn PersistenceAdapter> = web::Data::from(store);
    let sessions = SessionsState::new();
    let bind_addr = config.bind_addr.clone();

    info!("Faculty intake service listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(sessions.clone()))
            .app_data(store_data.clone())
            .app_data(web::Data::new(config.clone()))
            .service(services::form::configure_routes())
            .service(services::submissions::configure_routes())
            .service(services::admin::configure_routes())
    })
    .bind(bind_addr)?
    .run()
    .await
}
