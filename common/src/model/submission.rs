use crate::model::section::SectionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Faculty designation, one of three fixed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Designation {
    #[serde(rename = "AP")]
    Ap,
    #[serde(rename = "Associate Professor")]
    AssociateProfessor,
    #[serde(rename = "Professor")]
    Professor,
}

impl Designation {
    pub fn label(self) -> &'static str {
        match self {
            Designation::Ap => "AP",
            Designation::AssociateProfessor => "Associate Professor",
            Designation::Professor => "Professor",
        }
    }
}

/// Header record written once per successful submit. Immutable once persisted;
/// the form has no edit-after-submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub faculty_name: String,
    pub designation: Designation,
    /// Yes/No toggle per section at time of submit.
    pub active: HashMap<SectionKind, bool>,
}

/// What the caller gets back from a successful submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub submitted_at: DateTime<Utc>,
}
