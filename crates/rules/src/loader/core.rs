//! Core [`RuleLoader`] struct: filesystem-backed rule loading with optional hot-reload.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::profile::EvaluationProfile;
use crate::schema::{RuleDocument, RuleEnvelope};
use crate::validation::validate_document;

use super::error::{LoadResult, LoadStatus, Result, RuleError};
use super::store::RuleStore;
use super::watcher::handle_fs_event;

/// Filesystem-backed rule loader with optional hot-reload.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` files, deserializes
/// them into [`RuleDocument`] instances via two-pass deserialization, validates
/// them, and maintains an in-memory map keyed by rule ID.
pub struct RuleLoader {
    /// Root directory containing rule YAML files.
    rules_dir: PathBuf,
    /// In-memory documents keyed by `metadata.id`, with their source files.
    pub(super) store: RuleStore,
    /// Active filesystem watcher (held to keep it alive).
    _watcher: Option<RecommendedWatcher>,
}

impl RuleLoader {
    /// Create a new loader for the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist. The path is
    /// canonicalized so scanned paths match the ones the watcher reports.
    pub fn new(rules_dir: PathBuf) -> Self {
        if !rules_dir.exists() {
            if let Err(e) = fs::create_dir_all(&rules_dir) {
                warn!(path = %rules_dir.display(), error = %e, "failed to create rules directory");
            }
        }
        let rules_dir = fs::canonicalize(&rules_dir).unwrap_or(rules_dir);
        Self {
            rules_dir,
            store: RuleStore::default(),
            _watcher: None,
        }
    }

    /// Recursively scan the rules directory and load all YAML files.
    ///
    /// Dotfiles and non-YAML files are skipped. Parse and validation errors
    /// are reported per-file but do not abort the scan.
    pub fn load_all(&self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        self.scan_dir_recursive(&self.rules_dir, &mut results)?;
        Ok(results)
    }

    fn scan_dir_recursive(&self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read directory");
                return Ok(());
            }
        };

        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        // Stable load order so duplicate ids resolve the same way every run.
        paths.sort();

        for path in paths {
            if is_dotfile(&path) {
                if path.is_file() {
                    results.push(skipped(path, "dotfile"));
                }
                continue;
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            if !is_yaml(&path) {
                results.push(skipped(path, "not a YAML file"));
                continue;
            }

            match self.load_file(&path) {
                Ok(doc) => {
                    let rule_id = doc.metadata().id.clone();
                    info!(rule_id = %rule_id, kind = %doc.kind(), path = %path.display(), "loaded rule");
                    if self.store.upsert(&path, doc) {
                        warn!(rule_id = %rule_id, path = %path.display(), "rule id provided by several files, later file wins");
                    }
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Loaded { rule_id },
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load rule file");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse and validate a single YAML file. Does not touch the in-memory map.
    pub fn load_file(&self, path: &Path) -> Result<RuleDocument> {
        let contents = fs::read_to_string(path)?;
        parse_document(&contents)
    }

    /// Start a filesystem watcher with 500ms debounce.
    ///
    /// On file create/modify the rule is re-parsed, validated and upserted.
    /// On file delete the rule is removed from the in-memory map.
    /// Failures are logged as warnings; the previous version is kept.
    pub fn watch(&mut self) -> Result<()> {
        let store = self.store.clone();

        let mut watcher = notify::recommended_watcher(move |res: std::result::Result<notify::Event, notify::Error>| {
            match res {
                Ok(event) => handle_fs_event(&event, &store),
                Err(e) => warn!(error = %e, "filesystem watcher error"),
            }
        })?;

        watcher.watch(&self.rules_dir, RecursiveMode::Recursive)?;

        let _ = watcher.configure(notify::Config::default().with_poll_interval(Duration::from_millis(500)));

        info!(path = %self.rules_dir.display(), "watching rules directory for changes (recursive)");
        self._watcher = Some(watcher);
        Ok(())
    }

    pub fn rules_dir(&self) -> &Path {
        &self.rules_dir
    }

    /// Shared documents map; hot-reload writes through the same handle.
    pub fn documents(&self) -> Arc<RwLock<HashMap<String, RuleDocument>>> {
        self.store.documents()
    }

    /// Compile the currently loaded documents into an [`EvaluationProfile`].
    pub fn profile(&self) -> EvaluationProfile {
        let documents = self.store.documents();
        let guard = documents.read().expect("documents lock poisoned");
        EvaluationProfile::from_documents(guard.values())
    }

    /// Validate, then atomically write a rule document to `<id>.yml`.
    ///
    /// Writes to a dot-prefixed `.tmp` file first, then renames it into place.
    pub fn write_document(&self, doc: &RuleDocument) -> Result<PathBuf> {
        let validation = validate_document(doc);
        if !validation.valid {
            return Err(RuleError::Validation(validation.error_summary()));
        }

        let meta = doc.metadata();
        let final_path = self.rules_dir.join(format!("{}.yml", meta.id));
        let tmp_path = self.rules_dir.join(format!(".{}.tmp", meta.id));

        let yaml = doc.to_yaml()?;
        fs::write(&tmp_path, yaml)?;
        fs::rename(&tmp_path, &final_path)?;

        info!(rule_id = %meta.id, kind = %doc.kind(), path = %final_path.display(), "wrote rule file");

        self.store.upsert(&final_path, doc.clone());
        Ok(final_path)
    }

    /// Delete the file a rule was loaded from, removing the in-memory entry
    /// as well. Falls back to `<id>.yml` / `<id>.yaml` for unloaded rules.
    pub fn delete_rule(&self, id: &str) -> Result<()> {
        let path = self
            .store
            .source_of(id)
            .or_else(|| {
                ["yml", "yaml"]
                    .iter()
                    .map(|ext| self.rules_dir.join(format!("{}.{}", id, ext)))
                    .find(|p| p.exists())
            })
            .ok_or_else(|| RuleError::Validation(format!("no rule file found for id '{}'", id)))?;

        fs::remove_file(&path)?;
        self.store.remove_path(&path);

        info!(rule_id = %id, path = %path.display(), "deleted rule");
        Ok(())
    }
}

impl fmt::Debug for RuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleLoader")
            .field("rules_dir", &self.rules_dir)
            .field("documents", &self.store.len())
            .field("watching", &self._watcher.is_some())
            .finish()
    }
}

/// Two-pass parse followed by validation.
///
/// First pass reads the [`RuleEnvelope`] (kind + metadata); second pass
/// deserializes the kind-specific type. Documents with validation errors are
/// rejected; warnings are logged.
pub(super) fn parse_document(contents: &str) -> Result<RuleDocument> {
    let envelope: RuleEnvelope = serde_yaml::from_str(contents)?;

    if envelope.metadata.id.is_empty() {
        return Err(RuleError::Validation(
            "rule metadata.id must not be empty".to_string(),
        ));
    }

    let doc = envelope.parse_full().map_err(|e| {
        RuleError::Validation(format!("failed to parse rule '{}': {}", envelope.metadata.id, e))
    })?;

    let validation = validate_document(&doc);
    for warning in &validation.warnings {
        warn!(rule_id = %envelope.metadata.id, path = %warning.path, "{}", warning.message);
    }
    if !validation.valid {
        return Err(RuleError::Validation(format!(
            "rule '{}' failed validation: {}",
            envelope.metadata.id,
            validation.error_summary()
        )));
    }

    Ok(doc)
}

pub(super) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == "yml" || e == "yaml")
}

pub(super) fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn skipped(path: PathBuf, reason: &str) -> LoadResult {
    LoadResult {
        path,
        status: LoadStatus::Skipped {
            reason: reason.to_string(),
        },
    }
}
