//! Scratch storage: best-effort local persistence between explicit saves.
//!
//! Mirroring never fails loudly: write errors are logged and dropped, and a
//! payload that no longer parses reads back as "nothing saved".

pub mod file;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::resume::ResumeDocument;
use crate::templates::Template;

pub use file::FileScratchStore;

pub const DOCUMENT_KEY: &str = "resumeData";
pub const TEMPLATE_KEY: &str = "selectedTemplate";
pub const RECORD_KEY: &str = "resumeId";

#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("scratch I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scratch key '{0}'")]
    InvalidKey(String),
}

/// Keyed string storage.
pub trait ScratchStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ScratchError>;
}

/// Mirrors one editing session into scratch storage under `<namespace>/<key>`.
#[derive(Clone)]
pub struct ScratchMirror {
    store: Arc<dyn ScratchStore>,
    namespace: String,
}

impl ScratchMirror {
    pub fn new(store: Arc<dyn ScratchStore>, session_id: Uuid) -> Self {
        Self {
            store,
            namespace: session_id.to_string(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}/{}", self.namespace, name)
    }

    fn write(&self, name: &str, value: &str) {
        if let Err(e) = self.store.set(&self.key(name), value) {
            warn!("Scratch mirror write of {} failed: {e}", self.key(name));
        }
    }

    pub fn save_document(&self, document: &ResumeDocument) {
        match serde_json::to_string(document) {
            Ok(json) => self.write(DOCUMENT_KEY, &json),
            Err(e) => warn!("Could not encode document for scratch mirror: {e}"),
        }
    }

    pub fn save_template(&self, template: Template) {
        self.write(TEMPLATE_KEY, template.as_str());
    }

    pub fn save_record_link(&self, record_id: Option<Uuid>) {
        let value = record_id.map(|id| id.to_string()).unwrap_or_default();
        self.write(RECORD_KEY, &value);
    }

    pub fn load_document(&self) -> Option<ResumeDocument> {
        let raw = self.store.get(&self.key(DOCUMENT_KEY))?;
        match serde_json::from_str(&raw) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!("Discarding unreadable scratch document {}: {e}", self.namespace);
                None
            }
        }
    }

    pub fn load_template(&self) -> Option<Template> {
        self.store.get(&self.key(TEMPLATE_KEY))?.parse().ok()
    }

    pub fn load_record_link(&self) -> Option<Uuid> {
        self.store.get(&self.key(RECORD_KEY))?.parse().ok()
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::{ScratchError, ScratchStore};

    /// In-process scratch store for tests; can be told to fail every write.
    #[derive(Default)]
    pub struct MemoryScratchStore {
        entries: Mutex<HashMap<String, String>>,
        pub fail_writes: bool,
    }

    impl MemoryScratchStore {
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }
    }

    impl ScratchStore for MemoryScratchStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ScratchError> {
            if self.fail_writes {
                return Err(ScratchError::Io(std::io::Error::other("disk full")));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryScratchStore;
    use super::*;

    #[test]
    fn test_document_round_trips_through_mirror() {
        let store = Arc::new(MemoryScratchStore::default());
        let mirror = ScratchMirror::new(store.clone(), Uuid::new_v4());
        let doc = ResumeDocument::sample();
        mirror.save_document(&doc);
        mirror.save_template(Template::Minimal);
        assert_eq!(mirror.load_document(), Some(doc));
        assert_eq!(mirror.load_template(), Some(Template::Minimal));
    }

    #[test]
    fn test_corrupt_payload_reads_as_absent() {
        let store = Arc::new(MemoryScratchStore::default());
        let id = Uuid::new_v4();
        store.set(&format!("{id}/{DOCUMENT_KEY}"), "{not json").unwrap();
        let mirror = ScratchMirror::new(store, id);
        assert_eq!(mirror.load_document(), None);
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let mirror = ScratchMirror::new(Arc::new(MemoryScratchStore::failing()), Uuid::new_v4());
        mirror.save_document(&ResumeDocument::default());
        mirror.save_record_link(Some(Uuid::new_v4()));
        assert_eq!(mirror.load_document(), None);
    }

    #[test]
    fn test_cleared_record_link_reads_as_none() {
        let mirror = ScratchMirror::new(Arc::new(MemoryScratchStore::default()), Uuid::new_v4());
        let id = Uuid::new_v4();
        mirror.save_record_link(Some(id));
        assert_eq!(mirror.load_record_link(), Some(id));
        mirror.save_record_link(None);
        assert_eq!(mirror.load_record_link(), None);
    }
}
