//! Filesystem event handler for the notify watcher (hot-reload).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use tracing::{info, warn};

use super::core::{is_dotfile, is_yaml, parse_document};
use super::store::RuleStore;

/// Handle a single filesystem event from the notify watcher.
pub(super) fn handle_fs_event(event: &Event, store: &RuleStore) {
    // Dotfiles include the loader's own `.tmp` files.
    for path in event.paths.iter().filter(|p| is_yaml(p) && !is_dotfile(p)) {
        match &event.kind {
            EventKind::Create(CreateKind::File)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_)) => reload(path, store),
            EventKind::Remove(RemoveKind::File) => remove(path, store),
            _ => {}
        }
    }
}

fn reload(path: &Path, store: &RuleStore) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        // The "from" side of a rename.
        Err(e) if e.kind() == ErrorKind::NotFound => {
            remove(path, store);
            return;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file during hot-reload");
            return;
        }
    };

    match parse_document(&contents) {
        Ok(doc) => {
            let rule_id = doc.metadata().id.clone();
            info!(rule_id = %rule_id, kind = %doc.kind(), path = %path.display(), "hot-reloaded rule");
            if store.upsert(path, doc) {
                warn!(rule_id = %rule_id, path = %path.display(), "rule id provided by several files, later file wins");
            }
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "rejected rule during hot-reload, keeping previous version"
            );
        }
    }
}

fn remove(path: &Path, store: &RuleStore) {
    if let Some(rule_id) = store.remove_path(path) {
        info!(rule_id = %rule_id, path = %path.display(), "removed rule after file deletion");
    }
}
