use crate::model::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry in a repeating section.
///
/// The `id` is assigned once at creation and never reused; it correlates widget
/// state and cached attachments across re-renders and is not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub values: HashMap<String, FieldValue>,
}

impl Row {
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }
}
