use crate::model::field::FieldValue;
use crate::model::section::SectionKind;
use crate::model::submission::Designation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Toggle and confirmation state for one section as sent with a submit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SectionChoice {
    pub active: bool,
    /// "Uploaded documents match the entries above" checkbox. Only read for
    /// sections whose schema requires a confirmation.
    #[serde(default)]
    pub confirmed: bool,
}

/// Payload for the submit endpoint: the top-level fields plus the Yes/No toggle
/// and confirmation state per section. Rows come from the server-side session,
/// not from this payload. Sections missing from the map count as toggled "No".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFormRequest {
    pub faculty_name: String,
    pub designation: Designation,
    #[serde(default)]
    pub sections: HashMap<SectionKind, SectionChoice>,
}

/// Payload for binding a row's field values. Unknown field names are ignored,
/// so a client re-sending the whole widget state is harmless.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRowRequest {
    pub values: HashMap<String, FieldValue>,
}
