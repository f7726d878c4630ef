//! Ordered, mutable working set of repeating-section rows for one session.
//!
//! Rows are addressed by stable random identifiers rather than positions, so
//! the form can be re-evaluated on every interaction without duplicating rows
//! or losing values. Each initialized section keeps at least one row.

use crate::schema;
use common::model::field::FieldValue;
use common::model::row::Row;
use common::model::section::SectionKind;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct RowStore {
    rows: HashMap<SectionKind, Vec<Row>>,
}

fn new_row(kind: SectionKind) -> Row {
    Row {
        id: Uuid::new_v4().simple().to_string(),
        values: schema::section(kind).default_row_values(),
    }
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the section's single starting row. Idempotent: a section that
    /// already has rows is left untouched.
    pub fn initialize(&mut self, kind: SectionKind) {
        self.rows.entry(kind).or_insert_with(|| vec![new_row(kind)]);
    }

    /// Appends a blank row with a fresh identifier. No upper bound.
    pub fn add(&mut self, kind: SectionKind) -> Row {
        let row = new_row(kind);
        self.rows.entry(kind).or_default().push(row.clone());
        row
    }

    /// Removes a row unless it is the last one left in its section. Returns
    /// whether a row was actually removed, so the caller can drop its cached
    /// attachments.
    pub fn remove(&mut self, kind: SectionKind, row_id: &str) -> bool {
        let Some(rows) = self.rows.get_mut(&kind) else {
            return false;
        };
        if rows.len() <= 1 {
            return false;
        }
        let before = rows.len();
        rows.retain(|r| r.id != row_id);
        rows.len() < before
    }

    /// Current rows in insertion order. This order is user-visible and is
    /// preserved into persistence.
    pub fn rows(&self, kind: SectionKind) -> &[Row] {
        self.rows.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Overwrites the given fields on one row. Field names the section schema
    /// does not know are dropped. Returns whether the row exists.
    pub fn update(
        &mut self,
        kind: SectionKind,
        row_id: &str,
        values: HashMap<String, FieldValue>,
    ) -> bool {
        let row = self
            .rows
            .get_mut(&kind)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == row_id));
        let Some(row) = row else {
            return false;
        };
        let section = schema::section(kind);
        for (name, value) in values {
            if section.has_field(&name) {
                row.values.insert(name, value);
            }
        }
        true
    }

    /// Deep copy of all sections, for a `FormSnapshot`.
    pub fn snapshot(&self) -> HashMap<SectionKind, Vec<Row>> {
        self.rows.clone()
    }
}
