//! Per-user form sessions shared across the Actix workers.
//!
//! A session holds the row store and attachment cache for one in-progress form.
//! Sessions live in an `Arc<RwLock<HashMap>>` injected as `web::Data` in
//! `main.rs`; handlers take the write lock for mutations and the read lock for
//! snapshots.

use crate::form::attachments::AttachmentCache;
use crate::form::row_store::RowStore;
use common::model::row::Row;
use common::model::section::SectionKind;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Working state of one in-progress form: the ordered rows per section and the
/// cached uploads. Dropped after a successful submit.
#[derive(Debug)]
pub struct FormSession {
    pub rows: RowStore,
    pub attachments: AttachmentCache,
}

impl FormSession {
    /// Every section starts with its single blank row.
    pub fn new() -> Self {
        let mut rows = RowStore::new();
        for kind in SectionKind::ALL {
            rows.initialize(kind);
        }
        Self { rows, attachments: AttachmentCache::new() }
    }

    /// Current rows per section key, for state responses to the UI client.
    pub fn rows_by_section(&self) -> HashMap<&'static str, &[Row]> {
        SectionKind::ALL
            .into_iter()
            .map(|kind| (kind.key(), self.rows.rows(kind)))
            .collect()
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe container for all live sessions, cloned into each worker.
#[derive(Clone, Default)]
pub struct SessionsState {
    pub sessions: Arc<RwLock<HashMap<String, FormSession>>>,
}

impl SessionsState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_session_has_one_blank_row_per_section() {
        let session = FormSession::new();
        for kind in SectionKind::ALL {
            assert_eq!(session.rows.rows(kind).len(), 1, "{}", kind.key());
        }
    }
}
