//! Uploaded PDFs keyed by (row id, slot), kept across re-renders and failed
//! validation so nobody has to re-upload a file after fixing an unrelated
//! error. Nothing here touches durable storage.

use std::collections::HashMap;

/// One cached upload: the filename the user declared plus the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct AttachmentCache {
    files: HashMap<(String, String), CachedFile>,
}

impl AttachmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites any prior content for the (row, slot) key.
    pub fn store(&mut self, row_id: &str, slot: &str, name: &str, bytes: Vec<u8>) {
        self.files.insert(
            (row_id.to_string(), slot.to_string()),
            CachedFile { name: name.to_string(), bytes },
        );
    }

    pub fn get(&self, row_id: &str, slot: &str) -> Option<&CachedFile> {
        self.files.get(&(row_id.to_string(), slot.to_string()))
    }

    /// Removes one upload, e.g. when the user clears it. Returns whether
    /// anything was cached.
    pub fn clear(&mut self, row_id: &str, slot: &str) -> bool {
        self.files
            .remove(&(row_id.to_string(), slot.to_string()))
            .is_some()
    }

    /// Drops every slot of a removed row. Row ids are random, so the hazard is
    /// not id reuse but stale slot keys outliving the row they belonged to.
    pub fn clear_row(&mut self, row_id: &str) {
        self.files.retain(|(rid, _), _| rid != row_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_overwrites_previous_content() {
        let mut cache = AttachmentCache::new();
        cache.store("r1", "pdf", "first.pdf", vec![1]);
        cache.store("r1", "pdf", "second.pdf", vec![2, 3]);
        let file = cache.get("r1", "pdf").unwrap();
        assert_eq!(file.name, "second.pdf");
        assert_eq!(file.bytes, vec![2, 3]);
    }

    #[test]
    fn clear_removes_only_the_given_slot() {
        let mut cache = AttachmentCache::new();
        cache.store("r1", "sanction_pdf", "a.pdf", vec![1]);
        cache.store("r1", "completion_pdf", "b.pdf", vec![2]);
        assert!(cache.clear("r1", "sanction_pdf"));
        assert!(!cache.clear("r1", "sanction_pdf"));
        assert!(cache.get("r1", "completion_pdf").is_some());
    }

    #[test]
    fn clear_row_drops_every_slot_of_that_row() {
        let mut cache = AttachmentCache::new();
        cache.store("r1", "sanction_pdf", "a.pdf", vec![1]);
        cache.store("r1", "completion_pdf", "b.pdf", vec![2]);
        cache.store("r2", "sanction_pdf", "c.pdf", vec![3]);
        cache.clear_row("r1");
        assert!(cache.get("r1", "sanction_pdf").is_none());
        assert!(cache.get("r1", "completion_pdf").is_none());
        assert!(cache.get("r2", "sanction_pdf").is_some());
    }
}
