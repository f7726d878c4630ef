//! Backend-agnostic persistence seam between the orchestrator and storage.
//!
//! The orchestrator only ever talks to `PersistenceAdapter`; which backend sits
//! behind it (embedded database + local files here, spreadsheet + drive or
//! managed database + object storage in other deployments) is a configuration
//! choice, not a code path.

pub mod sqlite;

use crate::error::StoreError;
use common::model::attachment::AttachmentRef;
use common::model::section::SectionKind;
use common::model::submission::Submission;

/// One persisted child row: the cell values in schema column order, with the
/// submission id excluded — the adapter adds the foreign key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    pub cells: Vec<String>,
}

/// Durable storage for one submission: header record, per-section child rows
/// and binary attachments.
pub trait PersistenceAdapter: Send + Sync {
    /// Idempotently ensures the named collection exists with the given column
    /// layout. Fails with `StoreError::Schema` when an existing collection has
    /// an incompatible layout that cannot be auto-migrated.
    fn ensure_schema(&self, table: &str, columns: &[String]) -> Result<(), StoreError>;

    /// Writes the submission header record.
    fn write_header(&self, submission: &Submission) -> Result<(), StoreError>;

    /// Bulk-inserts a section's child rows; all share the one submission id as
    /// their foreign key.
    fn write_rows(
        &self,
        section: SectionKind,
        submission_id: &str,
        records: &[SectionRecord],
    ) -> Result<(), StoreError>;

    /// Durably stores one attachment and returns the reference to put into the
    /// owning row's record. Only PDF content within the size ceiling is
    /// accepted; anything else is a `StoreError::Upload`.
    fn store_attachment(
        &self,
        owner_id: &str,
        slot: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<AttachmentRef, StoreError>;

    /// Every persisted row of a table, cells in the registry's column order.
    /// Used by the admin export surface.
    fn read_all(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError>;

    /// Fetches the content behind a stored attachment reference.
    fn resolve_attachment(&self, attachment: &AttachmentRef) -> Result<Vec<u8>, StoreError>;
}
