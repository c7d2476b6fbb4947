//! Subcommand implementations.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use echoguard_core::config::RulesConfig;
use echoguard_core::{sort_by_priority, CallCharacteristics, Config};
use echoguard_rules::loader::LoadStatus;
use echoguard_rules::{validate_yaml, EvaluationProfile, Evaluator, InteractionReport, RuleLoader};

pub struct EvaluateOptions {
    pub input: Option<PathBuf>,
    pub rules_dir: Option<PathBuf>,
    pub lines: bool,
    pub sort_insights: bool,
    pub pretty: bool,
}

pub fn evaluate(config: &Config, opts: EvaluateOptions) -> Result<()> {
    let rules = rules_config(config, opts.rules_dir.clone());
    let loader = open_rules(&rules)?;

    let mut out = io::stdout().lock();
    let count = match opts.input.as_ref() {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to read {}", path.display()))?;
            evaluate_stream(BufReader::new(file), &mut out, &opts, loader.as_ref(), rules.watch)?
        }
        None => evaluate_stream(io::stdin().lock(), &mut out, &opts, loader.as_ref(), rules.watch)?,
    };
    info!(records = count, "evaluation finished");
    Ok(())
}

/// Evaluate call records from `reader`, writing one report per record.
///
/// In line mode each non-blank line is evaluated and written as soon as it is
/// read. Otherwise the whole input is a single record.
fn evaluate_stream<R: BufRead, W: Write>(
    mut reader: R,
    out: &mut W,
    opts: &EvaluateOptions,
    loader: Option<&RuleLoader>,
    watch: bool,
) -> Result<usize> {
    let mut evaluator = Evaluator::new(current_profile(loader));

    if !opts.lines {
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .context("failed to read call record")?;
        let call = CallCharacteristics::from_json(&raw).context("invalid call record")?;
        write_report(out, &evaluator, &call, opts)?;
        return Ok(1);
    }

    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", index + 1))?;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }
        // Pick up hot-reloaded rule files between records.
        if watch {
            evaluator = Evaluator::new(current_profile(loader));
        }
        let call = CallCharacteristics::from_json(record)
            .with_context(|| format!("invalid call record at line {}", index + 1))?;
        write_report(out, &evaluator, &call, opts)?;
        count += 1;
    }
    Ok(count)
}

pub fn validate(config: &Config, rules_dir: Option<PathBuf>) -> Result<()> {
    let rules = rules_config(config, rules_dir);
    if !rules.dir.is_dir() {
        bail!("rules directory {} does not exist", rules.dir.display());
    }

    let loader = RuleLoader::new(rules.dir.clone());
    let results = loader.load_all()?;

    let mut failed = 0;
    for result in &results {
        println!("{}: {}", result.path.display(), result.status);
        match &result.status {
            LoadStatus::Loaded { .. } => {
                let yaml = fs::read_to_string(&result.path)?;
                for warning in validate_yaml(&yaml).warnings {
                    println!("  warning: {}: {}", warning.path, warning.message);
                }
            }
            LoadStatus::Failed { .. } => failed += 1,
            LoadStatus::Skipped { .. } => {}
        }
    }

    let loaded = results.iter().filter(|r| r.is_loaded()).count();
    println!("{loaded} loaded, {failed} failed");
    if failed > 0 {
        bail!("{failed} rule file(s) failed to load");
    }
    Ok(())
}

fn rules_config(config: &Config, dir_override: Option<PathBuf>) -> RulesConfig {
    let mut rules = config.rules.clone();
    if let Some(dir) = dir_override {
        rules.dir = dir;
    }
    rules
}

/// Load the rules directory. A missing directory means built-in defaults.
fn open_rules(rules: &RulesConfig) -> Result<Option<RuleLoader>> {
    if !rules.dir.is_dir() {
        warn!(path = %rules.dir.display(), "rules directory not found, using built-in configuration");
        return Ok(None);
    }

    let mut loader = RuleLoader::new(rules.dir.clone());
    let results = loader.load_all()?;
    let failed: Vec<_> = results.iter().filter(|r| r.is_failed()).collect();
    if rules.strict {
        if let Some(first) = failed.first() {
            bail!(
                "{} rule file(s) failed to load (STRICT_RULES), first: {}: {}",
                failed.len(),
                first.path.display(),
                first.status
            );
        }
    }
    info!(
        loaded = results.iter().filter(|r| r.is_loaded()).count(),
        failed = failed.len(),
        "rules loaded"
    );

    if rules.watch {
        loader.watch()?;
    }
    Ok(Some(loader))
}

fn current_profile(loader: Option<&RuleLoader>) -> EvaluationProfile {
    loader.map(RuleLoader::profile).unwrap_or_default()
}

fn write_report<W: Write>(
    out: &mut W,
    evaluator: &Evaluator,
    call: &CallCharacteristics,
    opts: &EvaluateOptions,
) -> Result<()> {
    let mut report = evaluator.evaluate_interaction(call);
    if opts.sort_insights {
        sort_by_priority(&mut report.coaching_insights);
    }
    print_report(out, &report, opts.pretty)
}

fn print_report<W: Write>(out: &mut W, report: &InteractionReport, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::Path;

    use super::*;

    fn config_with_dir(dir: &Path, strict: bool) -> Config {
        let mut config = Config::for_profile("");
        config.rules = RulesConfig {
            dir: dir.to_path_buf(),
            watch: false,
            strict,
        };
        config
    }

    const BROKEN: &str = "apiVersion: v1\nkind: ScoringConfig\nmetadata:\n  id: Broken_Id\n  name: Broken\nspec: {}\n";

    #[test]
    fn override_beats_configured_dir() {
        let config = config_with_dir(Path::new("data/rules"), false);
        let rules = rules_config(&config, Some(PathBuf::from("/tmp/rules")));
        assert_eq!(rules.dir, PathBuf::from("/tmp/rules"));
        assert_eq!(rules_config(&config, None).dir, PathBuf::from("data/rules"));
    }

    #[test]
    fn missing_rules_dir_falls_back_to_builtin() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let config = config_with_dir(&missing, true);
        let loader = open_rules(&config.rules).unwrap();
        assert!(loader.is_none());
        assert!(!missing.exists());
        assert_eq!(current_profile(loader.as_ref()), EvaluationProfile::default());
    }

    #[test]
    fn strict_mode_rejects_failed_files() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("broken.yml"), BROKEN).unwrap();

        assert!(open_rules(&config_with_dir(dir.path(), false).rules).is_ok());
        let Err(err) = open_rules(&config_with_dir(dir.path(), true).rules) else {
            panic!("strict mode accepted a failing rule file");
        };
        assert!(err.to_string().contains("STRICT_RULES"));
    }

    #[test]
    fn validate_fails_on_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("broken.yml"), BROKEN).unwrap();
        assert!(validate(&config_with_dir(dir.path(), false), None).is_err());

        fs::remove_file(dir.path().join("broken.yml")).unwrap();
        assert!(validate(&config_with_dir(dir.path(), false), None).is_ok());
    }

    fn line_options() -> EvaluateOptions {
        EvaluateOptions {
            input: None,
            rules_dir: None,
            lines: true,
            sort_insights: false,
            pretty: false,
        }
    }

    const CALL: &str = r#"{"durationSeconds":400,"callType":"inbound"}"#;

    const LOW_BASELINE: &str = "apiVersion: v1\nkind: ScoringConfig\nmetadata:\n  id: scoring-low\n  name: Low Baseline\nspec:\n  baselines:\n    qa: 50\n";

    #[test]
    fn line_mode_writes_one_report_per_record() {
        let input = format!("{CALL}\n\n   \n{CALL}\n");
        let mut out = Vec::new();
        let count = evaluate_stream(Cursor::new(input), &mut out, &line_options(), None, false).unwrap();

        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        let reports: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["evaluation"]["qaScore"], 75);
    }

    #[test]
    fn line_mode_reports_earlier_records_before_a_bad_line() {
        let input = format!("{CALL}\n{CALL}\nnot json\n{CALL}\n");
        let mut out = Vec::new();
        let err = evaluate_stream(Cursor::new(input), &mut out, &line_options(), None, false).unwrap_err();

        assert!(err.to_string().contains("line 3"), "{err}");
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn line_mode_rebuilds_profile_between_records_when_watching() {
        let dir = tempfile::TempDir::new().unwrap();
        let loader = RuleLoader::new(dir.path().to_path_buf());
        loader.load_all().unwrap();

        // The rule file lands while the second record is being read.
        struct Staged<'a> {
            lines: Vec<String>,
            dir: &'a Path,
            loader: &'a RuleLoader,
        }
        impl io::Read for Staged<'_> {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                unreachable!("evaluate_stream reads through BufRead")
            }
        }
        impl BufRead for Staged<'_> {
            fn fill_buf(&mut self) -> io::Result<&[u8]> {
                Ok(self.lines.first().map(String::as_bytes).unwrap_or(&[]))
            }
            fn consume(&mut self, amt: usize) {
                if amt == 0 {
                    return;
                }
                let first = self.lines.remove(0);
                assert_eq!(amt, first.len());
                if self.lines.is_empty() {
                    fs::write(self.dir.join("low.yml"), LOW_BASELINE).unwrap();
                    self.loader.load_all().unwrap();
                }
            }
        }

        let reader = Staged {
            lines: vec![format!("{CALL}\n"), format!("{CALL}\n")],
            dir: dir.path(),
            loader: &loader,
        };
        let mut out = Vec::new();
        evaluate_stream(reader, &mut out, &line_options(), Some(&loader), true).unwrap();

        let text = String::from_utf8(out).unwrap();
        let qa: Vec<u64> = text
            .lines()
            .map(|line| {
                let report: serde_json::Value = serde_json::from_str(line).unwrap();
                report["evaluation"]["qaScore"].as_u64().unwrap()
            })
            .collect();
        assert_eq!(qa, vec![75, 55]);
    }
}
