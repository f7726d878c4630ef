//! Required-field and attachment validation over a form snapshot.
//!
//! Produces the ordered, human-readable error list shown to the user; an empty
//! list means the submission may proceed. Pure: identical state always yields
//! the identical list, and nothing durable is touched.
//!
//! Rules, per section schema:
//! - the faculty name is checked once, trimmed;
//! - sections toggled "No" are skipped entirely, stale rows and all;
//! - per active row, one coarse error covers all blank required fields;
//! - each missing required attachment slot gets its own error;
//! - an active section with a confirmation checkbox requires it checked.

use crate::form::attachments::AttachmentCache;
use crate::form::FormSnapshot;
use crate::schema::{self, FieldKind, FieldSpec};
use common::model::field::FieldValue;
use regex::Regex;
use std::sync::OnceLock;

fn text_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("literal pattern"))
}

fn field_ok(spec: &FieldSpec, value: Option<&FieldValue>) -> bool {
    let blank = value.map(FieldValue::is_blank).unwrap_or(true);
    match spec.kind {
        FieldKind::ShortText | FieldKind::LongText => !spec.required || !blank,
        FieldKind::TextDate => {
            if blank {
                return !spec.required;
            }
            value
                .and_then(FieldValue::as_text)
                .map(|s| text_date_re().is_match(s.trim()))
                .unwrap_or(false)
        }
        FieldKind::Date => {
            if blank {
                return !spec.required;
            }
            value.and_then(FieldValue::as_date).is_some()
        }
        FieldKind::Choice(options) => {
            if blank {
                return !spec.required;
            }
            value
                .and_then(FieldValue::as_text)
                .map(|s| options.contains(&s.trim()))
                .unwrap_or(false)
        }
        // Never required to be nonzero, only present, finite and non-negative.
        FieldKind::Decimal => match value.and_then(FieldValue::as_decimal) {
            Some(n) => n.is_finite() && n >= 0.0,
            None => !spec.required,
        },
        FieldKind::Bool => !spec.required || value.and_then(FieldValue::as_bool).is_some(),
    }
}

/// Validates the snapshot against the schema registry and the attachment
/// cache. Returns the aggregated error list, empty when clean.
pub fn validate(snapshot: &FormSnapshot, cache: &AttachmentCache) -> Vec<String> {
    let mut errors = Vec::new();

    if snapshot.request.faculty_name.trim().is_empty() {
        errors.push("Name of the Faculty is required.".to_string());
    }

    for section in schema::all() {
        if !snapshot.is_active(section.kind) {
            continue;
        }

        if let Some(message) = section.confirmation {
            if !snapshot.is_confirmed(section.kind) {
                errors.push(message.to_string());
            }
        }

        for (idx, row) in snapshot.rows(section.kind).iter().enumerate() {
            let number = idx + 1;
            let fields_ok = section
                .fields
                .iter()
                .all(|spec| field_ok(spec, row.value(spec.name)));
            if !fields_ok {
                errors.push(format!("{} #{}: {}", section.row_label, number, section.row_error));
            }
            for slot in section.slots.iter().filter(|s| s.required) {
                if cache.get(&row.id, slot.name).is_none() {
                    errors.push(format!(
                        "{} #{}: {} is required.",
                        section.row_label, number, slot.label
                    ));
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::model::row::Row;
    use common::model::section::SectionKind;
    use common::model::submission::Designation;
    use common::requests::{SectionChoice, SubmitFormRequest};
    use std::collections::HashMap;

    fn blank_request(name: &str) -> SubmitFormRequest {
        SubmitFormRequest {
            faculty_name: name.to_string(),
            designation: Designation::Professor,
            sections: HashMap::new(),
        }
    }

    fn snapshot(request: SubmitFormRequest) -> FormSnapshot {
        FormSnapshot { request, rows: HashMap::new() }
    }

    fn row(kind: SectionKind, id: &str) -> Row {
        Row {
            id: id.to_string(),
            values: schema::section(kind).default_row_values(),
        }
    }

    fn set(row: &mut Row, field: &str, value: FieldValue) {
        row.values.insert(field.to_string(), value);
    }

    fn complete_publication(id: &str) -> Row {
        let mut r = row(SectionKind::PublicationsJc, id);
        set(&mut r, "title", FieldValue::Text("On Intake Forms".into()));
        set(&mut r, "doi", FieldValue::Text("10.1000/xyz".into()));
        set(
            &mut r,
            "pub_date",
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 6, 1)),
        );
        r
    }

    fn activate(request: &mut SubmitFormRequest, kind: SectionKind, confirmed: bool) {
        request
            .sections
            .insert(kind, SectionChoice { active: true, confirmed });
    }

    #[test]
    fn blank_name_with_everything_toggled_no_yields_exactly_one_error() {
        let snap = snapshot(blank_request("   "));
        let errors = validate(&snap, &AttachmentCache::new());
        assert_eq!(errors, vec!["Name of the Faculty is required.".to_string()]);
    }

    #[test]
    fn publication_row_without_its_pdf_yields_one_error_naming_row_one() {
        let mut request = blank_request("Dr. A");
        activate(&mut request, SectionKind::PublicationsJc, true);
        let mut snap = snapshot(request);
        snap.rows
            .insert(SectionKind::PublicationsJc, vec![complete_publication("p1")]);

        let errors = validate(&snap, &AttachmentCache::new());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Publication #1"));
        assert!(errors[0].contains("PDF"));
    }

    #[test]
    fn cached_pdf_satisfies_the_required_slot() {
        let mut request = blank_request("Dr. A");
        activate(&mut request, SectionKind::PublicationsJc, true);
        let mut snap = snapshot(request);
        snap.rows
            .insert(SectionKind::PublicationsJc, vec![complete_publication("p1")]);

        let mut cache = AttachmentCache::new();
        cache.store("p1", "pdf", "paper.pdf", vec![0u8; 16]);
        assert!(validate(&snap, &cache).is_empty());
    }

    #[test]
    fn unchecked_confirmation_is_reported_for_active_sections_only() {
        let mut request = blank_request("Dr. A");
        activate(&mut request, SectionKind::PublicationsJc, false);
        let mut snap = snapshot(request);
        snap.rows
            .insert(SectionKind::PublicationsJc, vec![complete_publication("p1")]);

        let mut cache = AttachmentCache::new();
        cache.store("p1", "pdf", "paper.pdf", vec![0u8; 16]);

        let errors = validate(&snap, &cache);
        assert_eq!(
            errors,
            vec!["Please confirm Journal/Conference publication PDFs matching.".to_string()]
        );
    }

    #[test]
    fn section_toggled_back_to_no_is_ignored_with_stale_rows_present() {
        let mut request = blank_request("Dr. A");
        request.sections.insert(
            SectionKind::Membership,
            SectionChoice { active: false, confirmed: false },
        );
        let mut snap = snapshot(request);
        // Stale blank row left over from a previous toggle to "Yes".
        snap.rows
            .insert(SectionKind::Membership, vec![row(SectionKind::Membership, "m1")]);

        assert!(validate(&snap, &AttachmentCache::new()).is_empty());
    }

    #[test]
    fn blank_required_fields_produce_one_error_per_row_not_per_field() {
        let mut request = blank_request("Dr. A");
        activate(&mut request, SectionKind::Membership, false);
        let mut snap = snapshot(request);
        snap.rows.insert(
            SectionKind::Membership,
            vec![row(SectionKind::Membership, "m1"), row(SectionKind::Membership, "m2")],
        );

        let errors = validate(&snap, &AttachmentCache::new());
        assert_eq!(
            errors,
            vec![
                "Membership #1: all fields are required.".to_string(),
                "Membership #2: all fields are required.".to_string(),
            ]
        );
    }

    #[test]
    fn text_dates_must_match_the_dd_mm_yyyy_format() {
        let mut request = blank_request("Dr. A");
        activate(&mut request, SectionKind::Courses, false);
        let mut snap = snapshot(request);
        let mut r = row(SectionKind::Courses, "c1");
        set(&mut r, "date", FieldValue::Text("2024-06-01".into()));
        set(&mut r, "course_name", FieldValue::Text("Databases".into()));
        set(&mut r, "offered_by", FieldValue::Text("NPTEL".into()));
        set(&mut r, "grade", FieldValue::Text("A".into()));
        snap.rows.insert(SectionKind::Courses, vec![r.clone()]);

        let errors = validate(&snap, &AttachmentCache::new());
        assert_eq!(errors.len(), 1);

        set(&mut r, "date", FieldValue::Text("01/06/2024".into()));
        snap.rows.insert(SectionKind::Courses, vec![r]);
        assert!(validate(&snap, &AttachmentCache::new()).is_empty());
    }

    #[test]
    fn negative_amounts_are_rejected_but_zero_passes() {
        let mut request = blank_request("Dr. A");
        activate(&mut request, SectionKind::SponsoredProjects, true);
        let mut snap = snapshot(request);
        let mut r = row(SectionKind::SponsoredProjects, "sp1");
        set(
            &mut r,
            "project_date",
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15)),
        );
        set(&mut r, "pi_name", FieldValue::Text("Dr. A".into()));
        set(&mut r, "dept_sanctioned", FieldValue::Text("CSE".into()));
        set(&mut r, "project_title", FieldValue::Text("Grid".into()));
        set(&mut r, "funding_agency", FieldValue::Text("DST".into()));
        set(&mut r, "duration", FieldValue::Text("2 years".into()));
        set(&mut r, "amount_lakhs", FieldValue::Decimal(-1.0));
        snap.rows.insert(SectionKind::SponsoredProjects, vec![r.clone()]);

        let mut cache = AttachmentCache::new();
        cache.store("sp1", "sanction_pdf", "sanction.pdf", vec![0u8; 8]);

        let errors = validate(&snap, &cache);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Sponsored project #1"));

        set(&mut r, "amount_lakhs", FieldValue::Decimal(0.0));
        snap.rows.insert(SectionKind::SponsoredProjects, vec![r]);
        assert!(validate(&snap, &cache).is_empty());
    }

    #[test]
    fn validation_is_idempotent() {
        let mut request = blank_request("");
        activate(&mut request, SectionKind::Membership, false);
        let mut snap = snapshot(request);
        snap.rows
            .insert(SectionKind::Membership, vec![row(SectionKind::Membership, "m1")]);

        let cache = AttachmentCache::new();
        let first = validate(&snap, &cache);
        let second = validate(&snap, &cache);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
