use common::model::attachment::AttachmentRef;
use common::model::section::SectionKind;
use std::io;
use thiserror::Error;

/// Failures raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An existing collection's layout does not match the registry and cannot
    /// be auto-migrated. Operator-fixable, not user-fixable.
    #[error("schema mismatch in `{table}`: {detail}")]
    Schema { table: String, detail: String },
    /// Attachment transport, size or content-type failure.
    #[error("upload rejected for slot `{slot}`: {detail}")]
    Upload { slot: String, detail: String },
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Context for a write that failed after validation passed.
///
/// Nothing is rolled back; the carried state is what support staff need for
/// manual reconciliation of a partially written submission.
#[derive(Debug)]
pub struct PersistenceFailure {
    pub submission_id: String,
    pub section: Option<SectionKind>,
    /// 1-based row index within the failing section.
    pub row_index: Option<usize>,
    pub context: String,
    /// Attachment refs durably stored before the failure; they stay available
    /// for retry or reconciliation.
    pub stored: Vec<AttachmentRef>,
    pub source: StoreError,
}

/// Everything a submit attempt can come back with.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// User-correctable; the full aggregated error list, nothing persisted.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<String>),
    /// Target collection exists with an incompatible layout.
    #[error("storage schema error: {0}")]
    Schema(String),
    /// A write failed after validation passed; earlier writes stand.
    #[error("persistence failure for submission {}: {} ({})", .0.submission_id, .0.context, .0.source)]
    Persistence(PersistenceFailure),
}
