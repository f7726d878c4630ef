//! Embedded-database backend: SQLite tables plus attachments on the local
//! filesystem. Table layouts are created from the schema registry and verified
//! against it on every `ensure_schema`, so a collection that drifted from the
//! registry surfaces as a schema error instead of silently misaligned columns.

use crate::error::StoreError;
use crate::persistence::{PersistenceAdapter, SectionRecord};
use crate::schema;
use chrono::SecondsFormat;
use common::model::attachment::AttachmentRef;
use common::model::section::SectionKind;
use common::model::submission::Submission;
use rusqlite::Connection;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Hard ceiling for a single uploaded PDF.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

pub struct SqliteStore {
    db_path: PathBuf,
    files_dir: PathBuf,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl SqliteStore {
    pub fn new(db_path: impl Into<PathBuf>, files_dir: impl Into<PathBuf>) -> Self {
        Self { db_path: db_path.into(), files_dir: files_dir.into() }
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(conn)
    }

    fn insert_sql(table: &str, columns: &[String]) -> String {
        let quoted: Vec<String> = columns.iter().map(|c| format!("\"{}\"", c)).collect();
        let placeholders: Vec<String> =
            (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            table,
            quoted.join(", "),
            placeholders.join(", ")
        )
    }

    fn existing_columns(conn: &Connection, table: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<String>, rusqlite::Error>>()?;
        Ok(columns)
    }
}

impl PersistenceAdapter for SqliteStore {
    fn ensure_schema(&self, table: &str, columns: &[String]) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let column_ddl: Vec<String> =
            columns.iter().map(|c| format!("\"{}\" TEXT", c)).collect();
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
                table,
                column_ddl.join(", ")
            ),
            [],
        )?;

        // An existing table must match the registry layout exactly; there is
        // no auto-migration beyond this check.
        let existing = Self::existing_columns(&conn, table)?;
        if existing != columns {
            return Err(StoreError::Schema {
                table: table.to_string(),
                detail: format!("expected columns {:?}, found {:?}", columns, existing),
            });
        }
        Ok(())
    }

    fn write_header(&self, submission: &Submission) -> Result<(), StoreError> {
        let columns = schema::header_columns();
        let mut cells = vec![
            submission.id.clone(),
            submission
                .submitted_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            submission.faculty_name.clone(),
            submission.designation.label().to_string(),
        ];
        for kind in SectionKind::ALL {
            cells.push(
                yes_no(submission.active.get(&kind).copied().unwrap_or(false)).to_string(),
            );
        }

        let conn = self.connect()?;
        conn.execute(
            &Self::insert_sql(schema::HEADER_TABLE, &columns),
            rusqlite::params_from_iter(cells.iter()),
        )?;
        Ok(())
    }

    fn write_rows(
        &self,
        section: SectionKind,
        submission_id: &str,
        records: &[SectionRecord],
    ) -> Result<(), StoreError> {
        let columns = schema::section(section).columns();
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&Self::insert_sql(section.key(), &columns))?;
            for record in records {
                let mut cells = Vec::with_capacity(columns.len());
                cells.push(submission_id.to_string());
                cells.extend(record.cells.iter().cloned());
                stmt.execute(rusqlite::params_from_iter(cells.iter()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn store_attachment(
        &self,
        owner_id: &str,
        slot: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<AttachmentRef, StoreError> {
        // Drop any client-supplied path components.
        let safe_name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        if safe_name.is_empty() {
            return Err(StoreError::Upload {
                slot: slot.to_string(),
                detail: "missing filename".to_string(),
            });
        }
        if !safe_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(StoreError::Upload {
                slot: slot.to_string(),
                detail: "only PDF files are accepted".to_string(),
            });
        }
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(StoreError::Upload {
                slot: slot.to_string(),
                detail: format!(
                    "payload of {} bytes exceeds the {} byte limit",
                    bytes.len(),
                    MAX_ATTACHMENT_BYTES
                ),
            });
        }

        let dir = self.files_dir.join(owner_id);
        fs::create_dir_all(&dir)?;
        let stored_name = format!("{}_{}", slot, safe_name);
        fs::write(dir.join(&stored_name), bytes)?;

        Ok(AttachmentRef {
            name: safe_name.to_string(),
            location: format!("{}/{}", owner_id, stored_name),
        })
    }

    fn read_all(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        // Only registry tables are readable; this also keeps the identifier
        // out of attacker control.
        let columns = schema::columns_for_table(table)
            .ok_or_else(|| StoreError::NotFound(format!("unknown table `{}`", table)))?;

        let conn = self.connect()?;
        if Self::existing_columns(&conn, table)?.is_empty() {
            // Nothing submitted yet; the table is created on first submit.
            return Ok(Vec::new());
        }

        let quoted: Vec<String> = columns.iter().map(|c| format!("\"{}\"", c)).collect();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM \"{}\"",
            quoted.join(", "),
            table
        ))?;
        let rows = stmt
            .query_map([], |row| {
                let mut cells = Vec::with_capacity(columns.len());
                for i in 0..columns.len() {
                    cells.push(row.get::<_, String>(i)?);
                }
                Ok(cells)
            })?
            .collect::<Result<Vec<Vec<String>>, rusqlite::Error>>()?;
        Ok(rows)
    }

    fn resolve_attachment(&self, attachment: &AttachmentRef) -> Result<Vec<u8>, StoreError> {
        let location = &attachment.location;
        if location.contains("..") || location.starts_with('/') {
            return Err(StoreError::NotFound(format!(
                "invalid attachment location `{}`",
                location
            )));
        }
        match fs::read(self.files_dir.join(location)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(format!(
                "no stored attachment at `{}`",
                location
            ))),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::model::submission::Designation;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SqliteStore {
        SqliteStore::new(dir.path().join("intake.sqlite"), dir.path().join("files"))
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let columns = schema::section(SectionKind::Membership).columns();
        store.ensure_schema("membership", &columns).unwrap();
        store.ensure_schema("membership", &columns).unwrap();
    }

    #[test]
    fn ensure_schema_rejects_an_incompatible_existing_layout() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        {
            let conn = Connection::open(dir.path().join("intake.sqlite")).unwrap();
            conn.execute("CREATE TABLE membership (wrong TEXT)", []).unwrap();
        }
        let columns = schema::section(SectionKind::Membership).columns();
        match store.ensure_schema("membership", &columns) {
            Err(StoreError::Schema { table, .. }) => assert_eq!(table, "membership"),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn store_attachment_accepts_only_pdfs_within_the_limit() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        match store.store_attachment("S1-1", "pdf", "notes.txt", b"x") {
            Err(StoreError::Upload { slot, .. }) => assert_eq!(slot, "pdf"),
            other => panic!("expected upload error, got {:?}", other),
        }

        let oversized = vec![0u8; MAX_ATTACHMENT_BYTES + 1];
        assert!(matches!(
            store.store_attachment("S1-1", "pdf", "big.pdf", &oversized),
            Err(StoreError::Upload { .. })
        ));

        let stored = store
            .store_attachment("S1-1", "pdf", "paper.pdf", b"%PDF-1.4")
            .unwrap();
        assert_eq!(stored.name, "paper.pdf");
        assert_eq!(store.resolve_attachment(&stored).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn store_attachment_strips_client_path_components() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let stored = store
            .store_attachment("S1-1", "pdf", "../escape/paper.pdf", b"%PDF-1.4")
            .unwrap();
        assert_eq!(stored.name, "paper.pdf");
        assert!(!stored.location.contains(".."));
    }

    #[test]
    fn resolve_attachment_refuses_traversal_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let traversal = AttachmentRef {
            name: "x.pdf".into(),
            location: "../outside/x.pdf".into(),
        };
        assert!(matches!(
            store.resolve_attachment(&traversal),
            Err(StoreError::NotFound(_))
        ));
        let missing = AttachmentRef { name: "x.pdf".into(), location: "S9/pdf_x.pdf".into() };
        assert!(matches!(
            store.resolve_attachment(&missing),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn read_all_is_empty_before_any_submission() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.read_all("membership").unwrap().is_empty());
        assert!(matches!(
            store.read_all("no_such_table"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn header_and_rows_round_trip_in_column_order() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .ensure_schema(schema::HEADER_TABLE, &schema::header_columns())
            .unwrap();
        let membership = schema::section(SectionKind::Membership);
        store.ensure_schema("membership", &membership.columns()).unwrap();

        let mut active = HashMap::new();
        active.insert(SectionKind::Membership, true);
        let submission = Submission {
            id: "ABC123".to_string(),
            submitted_at: Utc::now(),
            faculty_name: "Dr. A".to_string(),
            designation: Designation::Ap,
            active,
        };
        store.write_header(&submission).unwrap();

        let record = SectionRecord {
            cells: vec!["IEEE".into(), "M-42".into(), "National".into(), "Senior".into()],
        };
        store
            .write_rows(SectionKind::Membership, "ABC123", &[record])
            .unwrap();

        let header = store.read_all(schema::HEADER_TABLE).unwrap();
        assert_eq!(header.len(), 1);
        assert_eq!(header[0][0], "ABC123");
        assert_eq!(header[0][2], "Dr. A");
        assert_eq!(header[0][3], "AP");
        assert_eq!(header[0][4], "Yes"); // has_membership

        let rows = store.read_all("membership").unwrap();
        assert_eq!(rows, vec![vec![
            "ABC123".to_string(),
            "IEEE".to_string(),
            "M-42".to_string(),
            "National".to_string(),
            "Senior".to_string(),
        ]]);
    }
}
