//! Runtime settings, read once from the environment in `main`.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Directory for stored attachment PDFs.
    pub files_dir: PathBuf,
    /// Shared admin passphrase. Empty means the admin surface is disabled.
    pub admin_password: String,
    pub bind_addr: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            db_path: var_or("FACULTY_INTAKE_DB", "faculty_intake.sqlite").into(),
            files_dir: var_or("FACULTY_INTAKE_FILES", "attachments").into(),
            admin_password: var_or("FACULTY_INTAKE_ADMIN_PASSWORD", ""),
            bind_addr: var_or("FACULTY_INTAKE_ADDR", "127.0.0.1:8080"),
        }
    }
}
