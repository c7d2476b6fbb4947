//! Shared in-memory rule store used by the loader and the watcher.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::schema::RuleDocument;

pub(super) type DocumentMap = Arc<RwLock<HashMap<String, RuleDocument>>>;

/// Documents keyed by `metadata.id`, plus the file each id was read from.
///
/// File names need not match ids, so removals and id changes are resolved
/// through `sources`. Locks are always taken `sources` first.
#[derive(Clone, Default)]
pub(super) struct RuleStore {
    documents: DocumentMap,
    sources: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl RuleStore {
    pub(super) fn documents(&self) -> DocumentMap {
        Arc::clone(&self.documents)
    }

    /// Record `doc` as the content of `path`.
    ///
    /// If `path` previously held a different id, that id is dropped unless
    /// another file still provides it. Returns `true` when another file
    /// already provides the same id (the new document replaces it).
    pub(super) fn upsert(&self, path: &Path, doc: RuleDocument) -> bool {
        let id = doc.metadata().id.clone();
        let mut sources = self.sources.write().expect("sources lock poisoned");
        let mut documents = self.documents.write().expect("documents lock poisoned");

        let shared = sources.iter().any(|(p, other)| *other == id && p != path);
        if let Some(previous) = sources.insert(path.to_path_buf(), id.clone()) {
            if previous != id && !sources.values().any(|other| *other == previous) {
                documents.remove(&previous);
            }
        }
        documents.insert(id, doc);
        shared
    }

    /// Forget `path`. Returns the id whose document was removed, if no other
    /// file still provides it.
    pub(super) fn remove_path(&self, path: &Path) -> Option<String> {
        let mut sources = self.sources.write().expect("sources lock poisoned");
        let id = sources.remove(path)?;
        if sources.values().any(|other| *other == id) {
            return None;
        }
        self.documents
            .write()
            .expect("documents lock poisoned")
            .remove(&id);
        Some(id)
    }

    /// File the document `id` was read from or written to.
    pub(super) fn source_of(&self, id: &str) -> Option<PathBuf> {
        self.sources
            .read()
            .expect("sources lock poisoned")
            .iter()
            .find(|(_, other)| *other == id)
            .map(|(path, _)| path.clone())
    }

    pub(super) fn len(&self) -> usize {
        self.documents.read().expect("documents lock poisoned").len()
    }
}
