//! Submission Orchestrator: the only component with side effects beyond
//! memory. Validates a form snapshot and, when clean, drives the persistence
//! adapter: header record first, then per active section every row's cached
//! attachments followed by one bulk row write.
//!
//! Persistence is deliberately not atomic: there is no transaction spanning the
//! header, the child sections and the attachment uploads. A failure partway is
//! reported with the submission id and the failing section/row so support staff
//! can reconcile manually; earlier writes are never rolled back, and duplicate
//! partial rows on retry are possible.

use crate::error::{PersistenceFailure, StoreError, SubmitError};
use crate::form::attachments::AttachmentCache;
use crate::form::validate::validate;
use crate::form::FormSnapshot;
use crate::persistence::{PersistenceAdapter, SectionRecord};
use crate::schema::{self, SectionSchema};
use chrono::Utc;
use common::model::attachment::AttachmentRef;
use common::model::row::Row;
use common::model::submission::{Submission, SubmissionReceipt};
use log::{info, warn};
use std::collections::HashMap;
use uuid::Uuid;

/// Opaque, uppercase, assigned once per successful validation pass.
fn new_submission_id() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(12)
        .collect::<String>()
        .to_uppercase()
}

fn cell(value: Option<&common::model::field::FieldValue>) -> String {
    use common::model::field::FieldValue;
    match value {
        None => String::new(),
        Some(FieldValue::Text(s)) => s.trim().to_string(),
        Some(FieldValue::Date(d)) => d.map(|d| d.to_string()).unwrap_or_default(),
        Some(FieldValue::Decimal(n)) => n.to_string(),
        Some(FieldValue::Bool(b)) => if *b { "Yes" } else { "No" }.to_string(),
    }
}

/// Flattens one row into persisted cells: fields in schema order, then the
/// `(name, ref)` pair per slot, blank when an optional slot has no upload.
fn record_for(
    section: &SectionSchema,
    row: &Row,
    refs: &HashMap<&'static str, AttachmentRef>,
) -> SectionRecord {
    let mut cells: Vec<String> = section
        .fields
        .iter()
        .map(|spec| cell(row.value(spec.name)))
        .collect();
    for slot in section.slots {
        match refs.get(slot.name) {
            Some(stored) => {
                cells.push(stored.name.clone());
                cells.push(stored.location.clone());
            }
            None => {
                cells.push(String::new());
                cells.push(String::new());
            }
        }
    }
    SectionRecord { cells }
}

fn ensure_all_schemas(
    store: &dyn PersistenceAdapter,
    submission_id: &str,
) -> Result<(), SubmitError> {
    let mut ensure = |table: &str, columns: &[String]| match store.ensure_schema(table, columns) {
        Ok(()) => Ok(()),
        Err(e @ StoreError::Schema { .. }) => Err(SubmitError::Schema(e.to_string())),
        Err(e) => Err(SubmitError::Persistence(PersistenceFailure {
            submission_id: submission_id.to_string(),
            section: None,
            row_index: None,
            context: format!("ensuring storage schema for `{}`", table),
            stored: Vec::new(),
            source: e,
        })),
    };

    ensure(schema::HEADER_TABLE, &schema::header_columns())?;
    for section in schema::all() {
        ensure(section.kind.key(), &section.columns())?;
    }
    Ok(())
}

/// Turns a validated in-memory form state into a durable submission.
///
/// On validation failure every accumulated error is returned and nothing
/// durable is touched. Attachment uploads for a row happen before that row's
/// record is written, so the record can reference the stored location;
/// `write_rows` is called exactly once per active section.
pub fn submit(
    snapshot: &FormSnapshot,
    cache: &AttachmentCache,
    store: &dyn PersistenceAdapter,
) -> Result<SubmissionReceipt, SubmitError> {
    let errors = validate(snapshot, cache);
    if !errors.is_empty() {
        return Err(SubmitError::Validation(errors));
    }

    let submission = Submission {
        id: new_submission_id(),
        submitted_at: Utc::now(),
        faculty_name: snapshot.request.faculty_name.trim().to_string(),
        designation: snapshot.request.designation,
        active: common::model::section::SectionKind::ALL
            .into_iter()
            .map(|kind| (kind, snapshot.is_active(kind)))
            .collect(),
    };

    ensure_all_schemas(store, &submission.id)?;

    if let Err(e) = store.write_header(&submission) {
        warn!("submission {}: header write failed: {}", submission.id, e);
        return Err(SubmitError::Persistence(PersistenceFailure {
            submission_id: submission.id,
            section: None,
            row_index: None,
            context: "writing the faculty header record".to_string(),
            stored: Vec::new(),
            source: e,
        }));
    }

    let mut stored_refs: Vec<AttachmentRef> = Vec::new();
    for section in schema::all() {
        if !snapshot.is_active(section.kind) {
            continue;
        }

        let rows = snapshot.rows(section.kind);
        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let number = idx + 1;
            let owner = format!("{}-{}", submission.id, number);
            let mut refs: HashMap<&'static str, AttachmentRef> = HashMap::new();
            for slot in section.slots {
                let Some(file) = cache.get(&row.id, slot.name) else {
                    // Validation guarantees required slots are cached; the
                    // rest are genuinely optional.
                    continue;
                };
                match store.store_attachment(&owner, slot.name, &file.name, &file.bytes) {
                    Ok(stored) => {
                        stored_refs.push(stored.clone());
                        refs.insert(slot.name, stored);
                    }
                    Err(e) => {
                        warn!(
                            "submission {}: upload failed for {} #{} slot {}: {}",
                            submission.id, section.row_label, number, slot.name, e
                        );
                        return Err(SubmitError::Persistence(PersistenceFailure {
                            submission_id: submission.id,
                            section: Some(section.kind),
                            row_index: Some(number),
                            context: format!(
                                "storing {} for {} #{}",
                                slot.label, section.row_label, number
                            ),
                            stored: stored_refs,
                            source: e,
                        }));
                    }
                }
            }
            records.push(record_for(section, row, &refs));
        }

        if let Err(e) = store.write_rows(section.kind, &submission.id, &records) {
            warn!(
                "submission {}: row write failed for {}: {}",
                submission.id,
                section.kind.key(),
                e
            );
            return Err(SubmitError::Persistence(PersistenceFailure {
                submission_id: submission.id,
                section: Some(section.kind),
                row_index: None,
                context: format!("writing `{}` child rows", section.kind.key()),
                stored: stored_refs,
                source: e,
            }));
        }
    }

    info!("submission {} persisted", submission.id);
    Ok(SubmissionReceipt {
        submission_id: submission.id,
        submitted_at: submission.submitted_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::model::field::FieldValue;
    use common::model::section::SectionKind;
    use common::model::submission::Designation;
    use common::requests::{SectionChoice, SubmitFormRequest};
    use std::sync::Mutex;

    /// Test double that records every adapter call.
    #[derive(Default)]
    struct RecordingStore {
        ensured: Mutex<Vec<String>>,
        headers: Mutex<Vec<Submission>>,
        row_writes: Mutex<Vec<(SectionKind, String, Vec<SectionRecord>)>>,
        uploads: Mutex<Vec<(String, String)>>,
        /// Simulated transport failure for owners ending in this suffix.
        fail_upload_owner_suffix: Option<String>,
    }

    impl PersistenceAdapter for RecordingStore {
        fn ensure_schema(&self, table: &str, _columns: &[String]) -> Result<(), StoreError> {
            self.ensured.lock().unwrap().push(table.to_string());
            Ok(())
        }

        fn write_header(&self, submission: &Submission) -> Result<(), StoreError> {
            self.headers.lock().unwrap().push(submission.clone());
            Ok(())
        }

        fn write_rows(
            &self,
            section: SectionKind,
            submission_id: &str,
            records: &[SectionRecord],
        ) -> Result<(), StoreError> {
            self.row_writes.lock().unwrap().push((
                section,
                submission_id.to_string(),
                records.to_vec(),
            ));
            Ok(())
        }

        fn store_attachment(
            &self,
            owner_id: &str,
            slot: &str,
            filename: &str,
            _bytes: &[u8],
        ) -> Result<AttachmentRef, StoreError> {
            if let Some(suffix) = &self.fail_upload_owner_suffix {
                if owner_id.ends_with(suffix.as_str()) {
                    return Err(StoreError::Upload {
                        slot: slot.to_string(),
                        detail: "simulated transport failure".to_string(),
                    });
                }
            }
            self.uploads
                .lock()
                .unwrap()
                .push((owner_id.to_string(), slot.to_string()));
            Ok(AttachmentRef {
                name: filename.to_string(),
                location: format!("{}/{}_{}", owner_id, slot, filename),
            })
        }

        fn read_all(&self, _table: &str) -> Result<Vec<Vec<String>>, StoreError> {
            Ok(Vec::new())
        }

        fn resolve_attachment(&self, a: &AttachmentRef) -> Result<Vec<u8>, StoreError> {
            Err(StoreError::NotFound(a.location.clone()))
        }
    }

    fn request(name: &str) -> SubmitFormRequest {
        SubmitFormRequest {
            faculty_name: name.to_string(),
            designation: Designation::AssociateProfessor,
            sections: HashMap::new(),
        }
    }

    fn activate(req: &mut SubmitFormRequest, kind: SectionKind, confirmed: bool) {
        req.sections
            .insert(kind, SectionChoice { active: true, confirmed });
    }

    fn membership_row(id: &str) -> Row {
        let mut row = Row {
            id: id.to_string(),
            values: schema::section(SectionKind::Membership).default_row_values(),
        };
        row.values
            .insert("body_name".into(), FieldValue::Text("  IEEE  ".into()));
        row.values
            .insert("membership_number".into(), FieldValue::Text("M-42".into()));
        row.values
            .insert("grade_position".into(), FieldValue::Text("Senior".into()));
        row
    }

    fn publication_row(id: &str) -> Row {
        let mut row = Row {
            id: id.to_string(),
            values: schema::section(SectionKind::PublicationsJc).default_row_values(),
        };
        row.values
            .insert("title".into(), FieldValue::Text("Paper".into()));
        row.values
            .insert("doi".into(), FieldValue::Text("10.1/abc".into()));
        row.values.insert(
            "pub_date".into(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 9)),
        );
        row
    }

    #[test]
    fn invalid_form_returns_errors_and_never_touches_the_adapter() {
        let snapshot = FormSnapshot { request: request("  "), rows: HashMap::new() };
        let store = RecordingStore::default();

        match submit(&snapshot, &AttachmentCache::new(), &store) {
            Err(SubmitError::Validation(errors)) => {
                assert_eq!(errors, vec!["Name of the Faculty is required.".to_string()]);
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
        assert!(store.ensured.lock().unwrap().is_empty());
        assert!(store.headers.lock().unwrap().is_empty());
        assert!(store.row_writes.lock().unwrap().is_empty());
        assert!(store.uploads.lock().unwrap().is_empty());
    }

    #[test]
    fn clean_submit_writes_header_once_and_one_bulk_call_per_active_section() {
        let mut req = request("Dr. B");
        activate(&mut req, SectionKind::Membership, false);
        activate(&mut req, SectionKind::PublicationsJc, true);

        let mut rows = HashMap::new();
        rows.insert(SectionKind::Membership, vec![membership_row("m1")]);
        rows.insert(
            SectionKind::PublicationsJc,
            vec![publication_row("p1"), publication_row("p2")],
        );
        let snapshot = FormSnapshot { request: req, rows };

        let mut cache = AttachmentCache::new();
        cache.store("p1", "pdf", "one.pdf", vec![1]);
        cache.store("p2", "pdf", "two.pdf", vec![2]);

        let store = RecordingStore::default();
        let receipt = submit(&snapshot, &cache, &store).unwrap();
        assert!(!receipt.submission_id.is_empty());

        let headers = store.headers.lock().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].faculty_name, "Dr. B");
        assert_eq!(headers[0].active.get(&SectionKind::Membership), Some(&true));
        assert_eq!(headers[0].active.get(&SectionKind::Courses), Some(&false));

        let writes = store.row_writes.lock().unwrap();
        assert_eq!(writes.len(), 2);
        let membership = writes
            .iter()
            .find(|(kind, _, _)| *kind == SectionKind::Membership)
            .unwrap();
        assert_eq!(membership.1, receipt.submission_id);
        assert_eq!(membership.2.len(), 1);
        // Text cells are trimmed on the way out.
        assert_eq!(membership.2[0].cells[0], "IEEE");

        let publications = writes
            .iter()
            .find(|(kind, _, _)| *kind == SectionKind::PublicationsJc)
            .unwrap();
        assert_eq!(publications.2.len(), 2);
        // pdf_name / pdf_ref follow the field cells.
        assert_eq!(publications.2[0].cells[4], "one.pdf");
        assert!(publications.2[0].cells[5].ends_with("pdf_one.pdf"));
        assert_eq!(publications.2[0].cells[3], "2024-03-09");

        assert_eq!(store.uploads.lock().unwrap().len(), 2);
    }

    #[test]
    fn failed_upload_names_the_row_and_keeps_earlier_refs() {
        let mut req = request("Dr. C");
        activate(&mut req, SectionKind::PublicationsJc, true);

        let mut rows = HashMap::new();
        rows.insert(
            SectionKind::PublicationsJc,
            vec![publication_row("p1"), publication_row("p2")],
        );
        let snapshot = FormSnapshot { request: req, rows };

        let mut cache = AttachmentCache::new();
        cache.store("p1", "pdf", "one.pdf", vec![1]);
        cache.store("p2", "pdf", "two.pdf", vec![2]);

        let store = RecordingStore {
            fail_upload_owner_suffix: Some("-2".to_string()),
            ..RecordingStore::default()
        };

        match submit(&snapshot, &cache, &store) {
            Err(SubmitError::Persistence(failure)) => {
                assert_eq!(failure.section, Some(SectionKind::PublicationsJc));
                assert_eq!(failure.row_index, Some(2));
                assert!(!failure.submission_id.is_empty());
                // Row #1's stored ref survives for reconciliation.
                assert_eq!(failure.stored.len(), 1);
                assert_eq!(failure.stored[0].name, "one.pdf");
            }
            other => panic!("expected persistence failure, got {:?}", other),
        }
        // The failing section never reached its bulk write.
        assert!(store.row_writes.lock().unwrap().is_empty());
        // The header had already been written and is not rolled back.
        assert_eq!(store.headers.lock().unwrap().len(), 1);
    }

    #[test]
    fn inactive_sections_are_not_persisted_even_with_stale_rows() {
        let mut req = request("Dr. D");
        activate(&mut req, SectionKind::Membership, false);
        req.sections.insert(
            SectionKind::Courses,
            SectionChoice { active: false, confirmed: false },
        );

        let mut rows = HashMap::new();
        rows.insert(SectionKind::Membership, vec![membership_row("m1")]);
        rows.insert(
            SectionKind::Courses,
            vec![Row {
                id: "c1".to_string(),
                values: schema::section(SectionKind::Courses).default_row_values(),
            }],
        );
        let snapshot = FormSnapshot { request: req, rows };

        let store = RecordingStore::default();
        submit(&snapshot, &AttachmentCache::new(), &store).unwrap();

        let writes = store.row_writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, SectionKind::Membership);
    }
}
