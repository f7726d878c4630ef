//! Field Schema Registry: the static catalogue of every repeating section.
//!
//! Each section lists its typed fields, its attachment slots, the label used in
//! per-row validation messages and the persisted column layout. The registry is
//! the single source of truth shared by the row store (defaults), the validator
//! (requirements) and the persistence layer (table layout and column order).

use common::model::field::FieldValue;
use common::model::section::SectionKind;
use std::collections::HashMap;

/// Semantic type of a form field, driving validation and default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ShortText,
    LongText,
    /// Free-text date entered as `DD/MM/YYYY`.
    TextDate,
    /// Calendar date, ISO on the wire.
    Date,
    /// One of a fixed set of values; the first option is the default.
    Choice(&'static [&'static str]),
    /// Non-negative decimal, defaults to zero. Zero is a valid value.
    Decimal,
    Bool,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A named PDF upload position on a row.
#[derive(Debug)]
pub struct SlotSpec {
    pub name: &'static str,
    /// Label used in validation and upload error messages.
    pub label: &'static str,
    pub required: bool,
}

#[derive(Debug)]
pub struct SectionSchema {
    pub kind: SectionKind,
    /// Prefix of per-row messages, e.g. "Membership #2: ...".
    pub row_label: &'static str,
    /// Message body when any required field of a row is blank.
    pub row_error: &'static str,
    pub fields: &'static [FieldSpec],
    pub slots: &'static [SlotSpec],
    /// Confirmation checkbox message required while the section is active,
    /// `None` when the section has no confirmation.
    pub confirmation: Option<&'static str>,
}

pub const HEADER_TABLE: &str = "faculty";

static MEMBERSHIP: SectionSchema = SectionSchema {
    kind: SectionKind::Membership,
    row_label: "Membership",
    row_error: "all fields are required.",
    fields: &[
        FieldSpec { name: "body_name", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "membership_number", kind: FieldKind::ShortText, required: true },
        FieldSpec {
            name: "level",
            kind: FieldKind::Choice(&["National", "International"]),
            required: true,
        },
        FieldSpec { name: "grade_position", kind: FieldKind::ShortText, required: true },
    ],
    slots: &[],
    confirmation: None,
};

static FDP_STTP: SectionSchema = SectionSchema {
    kind: SectionKind::FdpSttp,
    row_label: "Resource person entry",
    row_error: "all fields are required.",
    fields: &[
        FieldSpec {
            name: "program_type",
            kind: FieldKind::Choice(&["FDP", "STTP", "SWAYAM", "NPTEL", "MOOCs"]),
            required: true,
        },
        FieldSpec { name: "program_name", kind: FieldKind::ShortText, required: true },
        FieldSpec {
            name: "involvement",
            kind: FieldKind::Choice(&["Attended", "Organised"]),
            required: true,
        },
        FieldSpec { name: "date", kind: FieldKind::TextDate, required: true },
        FieldSpec { name: "location", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "organised_by", kind: FieldKind::ShortText, required: true },
    ],
    slots: &[],
    confirmation: None,
};

static COURSES: SectionSchema = SectionSchema {
    kind: SectionKind::Courses,
    row_label: "Course",
    row_error: "all fields are required.",
    fields: &[
        FieldSpec { name: "date", kind: FieldKind::TextDate, required: true },
        FieldSpec { name: "course_name", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "offered_by", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "grade", kind: FieldKind::ShortText, required: true },
    ],
    slots: &[],
    confirmation: None,
};

static STUDENT_SUPPORT: SectionSchema = SectionSchema {
    kind: SectionKind::StudentSupport,
    row_label: "Student support entry",
    row_error: "project name, date, place are required.",
    fields: &[
        FieldSpec { name: "project_name", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "event_date", kind: FieldKind::TextDate, required: true },
        FieldSpec { name: "place", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "website_link", kind: FieldKind::ShortText, required: false },
    ],
    slots: &[],
    confirmation: None,
};

static INDUSTRY: SectionSchema = SectionSchema {
    kind: SectionKind::Industry,
    row_label: "Industry entry",
    row_error: "all fields are required.",
    fields: &[
        FieldSpec { name: "activity_name", kind: FieldKind::LongText, required: true },
        FieldSpec { name: "company_place", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "duration", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "outcomes", kind: FieldKind::LongText, required: true },
    ],
    slots: &[],
    confirmation: None,
};

static PUBLICATIONS_JC: SectionSchema = SectionSchema {
    kind: SectionKind::PublicationsJc,
    row_label: "Publication",
    row_error: "Type, Title, DOI and publication date are required.",
    fields: &[
        FieldSpec {
            name: "pub_type",
            kind: FieldKind::Choice(&["Journal", "Conference"]),
            required: true,
        },
        FieldSpec { name: "title", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "doi", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "pub_date", kind: FieldKind::Date, required: true },
    ],
    slots: &[SlotSpec { name: "pdf", label: "PDF upload", required: true }],
    confirmation: Some("Please confirm Journal/Conference publication PDFs matching."),
};

static BOOKS_CHAPTERS: SectionSchema = SectionSchema {
    kind: SectionKind::BooksChapters,
    row_label: "Book/Chapter",
    row_error: "Type and Title are required.",
    fields: &[
        FieldSpec {
            name: "item_type",
            kind: FieldKind::Choice(&["Book", "Book Chapter"]),
            required: true,
        },
        FieldSpec { name: "title", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "publisher", kind: FieldKind::ShortText, required: false },
        FieldSpec { name: "pub_date", kind: FieldKind::Date, required: false },
    ],
    slots: &[SlotSpec { name: "pdf", label: "PDF upload", required: false }],
    confirmation: None,
};

static PATENTS_MODELS: SectionSchema = SectionSchema {
    kind: SectionKind::PatentsModels,
    row_label: "Patents/Models/Prototypes item",
    row_error: "Type, Title/Name, Date are required.",
    fields: &[
        FieldSpec {
            name: "item_type",
            kind: FieldKind::Choice(&[
                "Indian Patent Granted",
                "Utility granted",
                "Utility Published",
                "UK Design Patent",
                "Working Model",
                "Prototype",
            ]),
            required: true,
        },
        FieldSpec { name: "title", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "item_date", kind: FieldKind::Date, required: true },
        FieldSpec { name: "details", kind: FieldKind::LongText, required: false },
    ],
    slots: &[SlotSpec { name: "pdf", label: "PDF upload", required: false }],
    confirmation: None,
};

static SPONSORED_PROJECTS: SectionSchema = SectionSchema {
    kind: SectionKind::SponsoredProjects,
    row_label: "Sponsored project",
    row_error: "Date + required fields are mandatory.",
    fields: &[
        FieldSpec { name: "project_date", kind: FieldKind::Date, required: true },
        FieldSpec { name: "pi_name", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "co_pi", kind: FieldKind::ShortText, required: false },
        FieldSpec { name: "dept_sanctioned", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "project_title", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "funding_agency", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "duration", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "amount_lakhs", kind: FieldKind::Decimal, required: true },
        FieldSpec {
            name: "status",
            kind: FieldKind::Choice(&["Ongoing", "Completed"]),
            required: true,
        },
    ],
    slots: &[
        SlotSpec { name: "sanction_pdf", label: "Sanction/Approval PDF", required: true },
        SlotSpec { name: "completion_pdf", label: "Completion certificate", required: false },
    ],
    confirmation: Some("Please confirm Sponsored project documents matching."),
};

static CONSULTANCY_WORK: SectionSchema = SectionSchema {
    kind: SectionKind::ConsultancyWork,
    row_label: "Consultancy work",
    row_error: "Date + required fields are mandatory.",
    fields: &[
        FieldSpec { name: "project_date", kind: FieldKind::Date, required: true },
        FieldSpec { name: "pi_name", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "co_pi", kind: FieldKind::ShortText, required: false },
        FieldSpec { name: "dept_sanctioned", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "project_title", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "funding_agency", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "duration", kind: FieldKind::ShortText, required: true },
        FieldSpec { name: "amount_lakhs", kind: FieldKind::Decimal, required: true },
        FieldSpec {
            name: "status",
            kind: FieldKind::Choice(&["Ongoing", "Completed"]),
            required: true,
        },
    ],
    slots: &[
        SlotSpec { name: "approval_pdf", label: "Approval/Work order PDF", required: false },
        SlotSpec { name: "completion_pdf", label: "Completion/Report PDF", required: false },
    ],
    confirmation: Some("Please confirm Consultancy documents matching."),
};

pub fn section(kind: SectionKind) -> &'static SectionSchema {
    match kind {
        SectionKind::Membership => &MEMBERSHIP,
        SectionKind::FdpSttp => &FDP_STTP,
        SectionKind::Courses => &COURSES,
        SectionKind::StudentSupport => &STUDENT_SUPPORT,
        SectionKind::Industry => &INDUSTRY,
        SectionKind::PublicationsJc => &PUBLICATIONS_JC,
        SectionKind::BooksChapters => &BOOKS_CHAPTERS,
        SectionKind::PatentsModels => &PATENTS_MODELS,
        SectionKind::SponsoredProjects => &SPONSORED_PROJECTS,
        SectionKind::ConsultancyWork => &CONSULTANCY_WORK,
    }
}

/// All section schemas in canonical form order.
pub fn all() -> impl Iterator<Item = &'static SectionSchema> {
    SectionKind::ALL.into_iter().map(section)
}

impl SectionSchema {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn slot(&self, name: &str) -> Option<&'static SlotSpec> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Persisted column order: submission id first, the fields in definition
    /// order, then a `(<slot>_name, <slot>_ref)` pair per attachment slot.
    pub fn columns(&self) -> Vec<String> {
        let mut cols = vec!["submission_id".to_string()];
        cols.extend(self.fields.iter().map(|f| f.name.to_string()));
        for slot in self.slots {
            cols.push(format!("{}_name", slot.name));
            cols.push(format!("{}_ref", slot.name));
        }
        cols
    }

    /// Field values of a freshly added blank row.
    pub fn default_row_values(&self) -> HashMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|f| {
                let value = match f.kind {
                    FieldKind::Choice(options) => {
                        FieldValue::Text(options.first().copied().unwrap_or_default().to_string())
                    }
                    FieldKind::Decimal => FieldValue::Decimal(0.0),
                    FieldKind::Date => FieldValue::Date(None),
                    FieldKind::Bool => FieldValue::Bool(false),
                    FieldKind::ShortText | FieldKind::LongText | FieldKind::TextDate => {
                        FieldValue::default()
                    }
                };
                (f.name.to_string(), value)
            })
            .collect()
    }
}

/// Column layout of the `faculty` header table.
pub fn header_columns() -> Vec<String> {
    let mut cols = vec![
        "submission_id".to_string(),
        "submitted_at".to_string(),
        "faculty_name".to_string(),
        "designation".to_string(),
    ];
    cols.extend(SectionKind::ALL.iter().map(|kind| kind.flag_column().to_string()));
    cols
}

/// Column layout for any persisted table, header or section child.
pub fn columns_for_table(table: &str) -> Option<Vec<String>> {
    if table == HEADER_TABLE {
        return Some(header_columns());
    }
    SectionKind::from_key(table).map(|kind| section(kind).columns())
}
