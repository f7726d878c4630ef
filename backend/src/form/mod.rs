//! In-memory form state: the row store, the attachment cache and the validator.
//!
//! Everything here is side-effect free with respect to persistence. The HTTP
//! layer mutates a session's `RowStore` and `AttachmentCache` as the user edits
//! the form; at submit time a `FormSnapshot` is taken and handed to the
//! validator and the orchestrator.

pub mod attachments;
pub mod row_store;
pub mod validate;

use common::model::row::Row;
use common::model::section::SectionKind;
use common::requests::SubmitFormRequest;
use std::collections::HashMap;

/// Point-in-time copy of everything the validator and orchestrator see: the
/// submit payload plus the session's rows.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub request: SubmitFormRequest,
    pub rows: HashMap<SectionKind, Vec<Row>>,
}

impl FormSnapshot {
    /// A section missing from the request counts as toggled "No".
    pub fn is_active(&self, kind: SectionKind) -> bool {
        self.request.sections.get(&kind).map(|c| c.active).unwrap_or(false)
    }

    pub fn is_confirmed(&self, kind: SectionKind) -> bool {
        self.request.sections.get(&kind).map(|c| c.confirmed).unwrap_or(false)
    }

    pub fn rows(&self, kind: SectionKind) -> &[Row] {
        self.rows.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}
