//! Tests for the rule loader module.

use std::fs;

use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use tempfile::TempDir;

use super::watcher::handle_fs_event;
use super::*;
use crate::keyword_config::KeywordRule;
use crate::schema::{RuleDocument, RuleKind};

const KEYWORDS_YAML: &str = r#"
apiVersion: v1
kind: KeywordConfig
metadata:
  id: keywords-retail
  name: Retail Keywords
spec:
  keywords:
    greeting: [welcome to, thanks for calling]
    empathy: [sorry, understand]
    closing: [anything else]
    security: [pin, password]
    resolution: [sorted, resolved]
    alternative_resolution: [refund]
"#;

const SCORING_YAML: &str = r#"
apiVersion: v1
kind: ScoringConfig
metadata:
  id: scoring-strict
  name: Strict Scoring
spec:
  alert_thresholds:
    low_quality: 65
    suboptimal_handling: 75
"#;

const INVALID_SCORING_YAML: &str = r#"
apiVersion: v1
kind: ScoringConfig
metadata:
  id: scoring-broken
  name: Broken Scoring
spec:
  baselines:
    qa: 150
"#;

fn temp_loader() -> (TempDir, RuleLoader) {
    let dir = TempDir::new().expect("create tempdir");
    let loader = RuleLoader::new(dir.path().to_path_buf());
    (dir, loader)
}

fn ids(loader: &RuleLoader) -> Vec<String> {
    let mut ids: Vec<_> = loader.documents().read().unwrap().keys().cloned().collect();
    ids.sort();
    ids
}

fn fs_event(kind: EventKind, loader: &RuleLoader, name: &str) -> Event {
    Event::new(kind).add_path(loader.rules_dir().join(name))
}

fn loaded_ids(results: &[LoadResult]) -> Vec<String> {
    results
        .iter()
        .filter_map(|r| match &r.status {
            LoadStatus::Loaded { rule_id } => Some(rule_id.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn load_keyword_config_from_file() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("keywords-retail.yml");
    fs::write(&path, KEYWORDS_YAML).unwrap();

    let doc = loader.load_file(&path).unwrap();
    assert_eq!(doc.kind(), RuleKind::KeywordConfig);
    assert_eq!(doc.metadata().name, "Retail Keywords");
    let compiled = doc.as_keyword_config().unwrap().compile();
    assert_eq!(compiled.get(KeywordRule::Security), ["pin", "password"]);
}

#[test]
fn load_all_skips_dotfiles_and_non_yaml() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("keywords.yml"), KEYWORDS_YAML).unwrap();
    fs::write(dir.path().join(".hidden.yml"), SCORING_YAML).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a rule").unwrap();

    let results = loader.load_all().unwrap();

    assert_eq!(loaded_ids(&results), vec!["keywords-retail"]);
    let skipped = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Skipped { .. }))
        .count();
    assert_eq!(skipped, 2);
    assert_eq!(loader.documents().read().unwrap().len(), 1);
}

#[test]
fn load_all_recurses_into_subdirectories() {
    let (dir, loader) = temp_loader();
    fs::create_dir_all(dir.path().join("keywords")).unwrap();
    fs::create_dir_all(dir.path().join("scoring")).unwrap();
    fs::write(dir.path().join("keywords/retail.yml"), KEYWORDS_YAML).unwrap();
    fs::write(dir.path().join("scoring/strict.yaml"), SCORING_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_ids(&results), vec!["keywords-retail", "scoring-strict"]);
}

#[test]
fn validation_errors_fail_the_file() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("broken.yml"), INVALID_SCORING_YAML).unwrap();
    fs::write(dir.path().join("strict.yml"), SCORING_YAML).unwrap();

    let results = loader.load_all().unwrap();
    let failed: Vec<_> = results.iter().filter(|r| r.is_failed()).collect();
    assert_eq!(failed.len(), 1);
    match &failed[0].status {
        LoadStatus::Failed { error } => {
            assert!(error.contains("scoring-broken"), "{error}");
            assert!(error.contains("spec.baselines.qa"), "{error}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(loaded_ids(&results), vec!["scoring-strict"]);
}

#[test]
fn unknown_kind_is_rejected() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("odd.yml");
    fs::write(
        &path,
        "apiVersion: v1\nkind: AlertRoute\nmetadata:\n  id: odd\n  name: Odd\nspec: {}\n",
    )
    .unwrap();

    let err = loader.load_file(&path).unwrap_err();
    assert!(matches!(err, RuleError::Validation(_)));
    assert!(err.to_string().contains("unknown rule kind"));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("bad.yml");
    fs::write(&path, "kind: [unclosed").unwrap();
    assert!(matches!(loader.load_file(&path), Err(RuleError::Parse(_))));
}

#[test]
fn empty_id_is_rejected() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("noid.yml");
    fs::write(
        &path,
        "apiVersion: v1\nkind: ScoringConfig\nmetadata:\n  id: \"\"\n  name: No Id\nspec: {}\n",
    )
    .unwrap();
    let err = loader.load_file(&path).unwrap_err();
    assert!(err.to_string().contains("metadata.id must not be empty"));
}

#[test]
fn profile_reflects_loaded_documents() {
    let (dir, loader) = temp_loader();
    assert_eq!(loader.profile(), crate::EvaluationProfile::default());

    fs::write(dir.path().join("keywords.yml"), KEYWORDS_YAML).unwrap();
    fs::write(dir.path().join("scoring.yml"), SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    let profile = loader.profile();
    assert_eq!(profile.scoring.alert_thresholds.low_quality, 65);
    assert_eq!(profile.scoring.alert_thresholds.suboptimal_handling, 75);
    // Sections left out of the document keep their defaults.
    assert_eq!(profile.scoring.baselines.qa, 70);
    assert_eq!(
        profile.keywords.get(KeywordRule::Greeting),
        ["welcome to", "thanks for calling"]
    );
}

#[test]
fn write_document_then_reload() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("seed.yml");
    fs::write(&path, SCORING_YAML).unwrap();
    let mut doc = loader.load_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    doc.metadata_mut().id = "scoring-copy".to_string();
    let written = loader.write_document(&doc).unwrap();
    assert_eq!(written, loader.rules_dir().join("scoring-copy.yml"));
    assert!(!dir.path().join(".scoring-copy.tmp").exists());

    let reloaded = loader.load_file(&written).unwrap();
    assert_eq!(reloaded, doc);
    assert!(loader.documents().read().unwrap().contains_key("scoring-copy"));
}

#[test]
fn write_document_refuses_invalid() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("seed.yml");
    fs::write(&path, SCORING_YAML).unwrap();
    let mut doc = loader.load_file(&path).unwrap();

    if let RuleDocument::ScoringConfig(rule) = &mut doc {
        rule.spec.score_bands.fair = 95;
    }
    let err = loader.write_document(&doc).unwrap_err();
    assert!(err.to_string().contains("spec.score_bands"));
}

#[test]
fn delete_rule_removes_file_and_entry() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("scoring-strict.yml"), SCORING_YAML).unwrap();
    loader.load_all().unwrap();
    assert!(loader.documents().read().unwrap().contains_key("scoring-strict"));

    loader.delete_rule("scoring-strict").unwrap();
    assert!(!dir.path().join("scoring-strict.yml").exists());
    assert!(loader.documents().read().unwrap().is_empty());

    assert!(loader.delete_rule("scoring-strict").is_err());
}

#[test]
fn new_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a/b/rules");
    let loader = RuleLoader::new(nested.clone());
    assert!(nested.is_dir());
    assert_eq!(loader.rules_dir(), fs::canonicalize(&nested).unwrap());
    assert!(loader.load_all().unwrap().is_empty());
}

#[test]
fn delete_rule_resolves_file_by_id() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("default-scoring.yml"), SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    loader.delete_rule("scoring-strict").unwrap();
    assert!(!dir.path().join("default-scoring.yml").exists());
    assert!(ids(&loader).is_empty());
}

#[test]
fn debug_output_summarizes_loader() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("strict.yml"), SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    let debug = format!("{loader:?}");
    assert!(debug.starts_with("RuleLoader"), "{debug}");
    assert!(debug.contains("documents: 1"), "{debug}");
    assert!(debug.contains("watching: false"), "{debug}");
}

#[test]
fn hot_reload_create_upserts_document() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("retail.yml"), KEYWORDS_YAML).unwrap();

    handle_fs_event(&fs_event(EventKind::Create(CreateKind::File), &loader, "retail.yml"), &loader.store);
    assert_eq!(ids(&loader), vec!["keywords-retail"]);
    assert_eq!(
        loader.profile().keywords.get(KeywordRule::Security),
        ["pin", "password"]
    );
}

#[test]
fn hot_reload_modify_updates_document() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("strict.yml");
    fs::write(&path, SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    fs::write(&path, SCORING_YAML.replace("low_quality: 65", "low_quality: 55")).unwrap();
    let modify = EventKind::Modify(ModifyKind::Data(DataChange::Content));
    handle_fs_event(&fs_event(modify, &loader, "strict.yml"), &loader.store);
    assert_eq!(loader.profile().scoring.alert_thresholds.low_quality, 55);
}

#[test]
fn hot_reload_invalid_modify_keeps_previous_version() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("strict.yml");
    fs::write(&path, SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    fs::write(&path, INVALID_SCORING_YAML.replace("scoring-broken", "scoring-strict")).unwrap();
    let modify = EventKind::Modify(ModifyKind::Data(DataChange::Content));
    handle_fs_event(&fs_event(modify, &loader, "strict.yml"), &loader.store);

    assert_eq!(ids(&loader), vec!["scoring-strict"]);
    assert_eq!(loader.profile().scoring.alert_thresholds.low_quality, 65);
}

#[test]
fn hot_reload_remove_drops_document_whose_id_differs_from_file_name() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("default-keywords.yml");
    fs::write(&path, KEYWORDS_YAML.replace("keywords-retail", "keywords-default")).unwrap();
    loader.load_all().unwrap();
    assert_eq!(ids(&loader), vec!["keywords-default"]);

    fs::remove_file(&path).unwrap();
    handle_fs_event(
        &fs_event(EventKind::Remove(RemoveKind::File), &loader, "default-keywords.yml"),
        &loader.store,
    );
    assert!(ids(&loader).is_empty());
    assert_eq!(loader.profile(), crate::EvaluationProfile::default());
}

#[test]
fn hot_reload_id_change_drops_old_id() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("keywords.yml");
    fs::write(&path, KEYWORDS_YAML).unwrap();
    loader.load_all().unwrap();

    fs::write(&path, KEYWORDS_YAML.replace("keywords-retail", "keywords-branch")).unwrap();
    let modify = EventKind::Modify(ModifyKind::Data(DataChange::Content));
    handle_fs_event(&fs_event(modify, &loader, "keywords.yml"), &loader.store);
    assert_eq!(ids(&loader), vec!["keywords-branch"]);
}

#[test]
fn hot_reload_missing_file_counts_as_removal() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("strict.yml");
    fs::write(&path, SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    fs::remove_file(&path).unwrap();
    let rename = EventKind::Modify(ModifyKind::Name(notify::event::RenameMode::From));
    handle_fs_event(&fs_event(rename, &loader, "strict.yml"), &loader.store);
    assert!(ids(&loader).is_empty());
}

#[test]
fn hot_reload_remove_keeps_id_still_provided_by_another_file() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join("a.yml"), SCORING_YAML).unwrap();
    fs::write(dir.path().join("b.yml"), SCORING_YAML).unwrap();
    loader.load_all().unwrap();

    fs::remove_file(dir.path().join("a.yml")).unwrap();
    handle_fs_event(&fs_event(EventKind::Remove(RemoveKind::File), &loader, "a.yml"), &loader.store);
    assert_eq!(ids(&loader), vec!["scoring-strict"]);
}

#[test]
fn hot_reload_ignores_dotfiles() {
    let (dir, loader) = temp_loader();
    fs::write(dir.path().join(".keywords.tmp"), KEYWORDS_YAML).unwrap();
    fs::write(dir.path().join(".staged.yml"), KEYWORDS_YAML).unwrap();

    for name in [".keywords.tmp", ".staged.yml"] {
        handle_fs_event(&fs_event(EventKind::Create(CreateKind::File), &loader, name), &loader.store);
    }
    assert!(ids(&loader).is_empty());
}
