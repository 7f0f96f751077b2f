use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use hunter_core::ThresholdTier;
use hunter_engine::presentation::{apply_lens, LensMode};
use hunter_engine::{award_points, evaluate_answer, EngineContext};
use hunter_rules::loader::LoadStatus;
use hunter_rules::validation::validate_document;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::cli::{CheckArgs, GenerateArgs, LensArgs};
use crate::config::{load_context, load_rules, RunConfig};

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ── generate ────────────────────────────────────────────────────

/// `count` challenges seeded `first`, `first + 1`, ... as `{seed, challenge}` objects.
pub fn generate_challenges(
    ctx: &EngineContext,
    level: u32,
    tier: &ThresholdTier,
    first: u64,
    count: usize,
) -> Result<Vec<Value>> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count as u64 {
        let seed = first.wrapping_add(i);
        let challenge = ctx
            .generate_level_seeded(level, tier, seed)
            .with_context(|| format!("failed to generate level {}", level))?;
        out.push(json!({ "seed": seed, "challenge": challenge }));
    }
    Ok(out)
}

pub fn generate(run: &RunConfig, args: &GenerateArgs) -> Result<ExitCode> {
    let ctx = load_context(&run.rules_dir)?;
    let tier = run.tier(args.tier);
    let out = generate_challenges(&ctx, args.level, &tier, run.seed(args.seed), args.count)?;

    let pretty = args.pretty || run.pretty;
    match out.as_slice() {
        [single] => print_json(single, pretty)?,
        _ => print_json(&out, pretty)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ── validate ────────────────────────────────────────────────────

/// Per-file and per-document findings for one rules directory.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub lines: Vec<String>,
    pub failed: bool,
}

pub fn validate_rules(dir: &Path) -> Result<ValidationReport> {
    let (loader, results) = load_rules(dir)?;
    let mut report = ValidationReport::default();

    for r in &results {
        let line = match &r.status {
            LoadStatus::Loaded { rule_id } => format!("  ok    {} ({})", r.path.display(), rule_id),
            LoadStatus::Skipped { reason } => format!("  skip  {} ({})", r.path.display(), reason),
            LoadStatus::Failed { error } => {
                report.failed = true;
                format!("  FAIL  {}: {}", r.path.display(), error)
            }
        };
        report.lines.push(line);
    }

    for (id, doc) in loader.documents() {
        let result = validate_document(doc);
        for e in &result.errors {
            report.lines.push(match &e.suggestion {
                Some(s) => format!("  error   {id} {}: {} {}", e.path, e.message, s),
                None => format!("  error   {id} {}: {}", e.path, e.message),
            });
        }
        for w in &result.warnings {
            report.lines.push(format!("  warning {id} {}: {}", w.path, w.message));
        }
        report.failed |= !result.valid;
    }

    if !loader.rule_set().is_complete() {
        report.failed = true;
        report.lines.push(
            "  rule set is incomplete: need one DatasetRules and one LevelProgression document".to_string(),
        );
    }

    info!(documents = loader.documents().len(), failed = report.failed, "validation finished");
    Ok(report)
}

pub fn validate(run: &RunConfig) -> Result<ExitCode> {
    let report = validate_rules(&run.rules_dir)?;
    println!("Rules directory: {}", run.rules_dir.display());
    for line in &report.lines {
        println!("{}", line);
    }
    if report.failed {
        println!("Validation failed.");
    } else {
        println!("All rule files valid.");
    }
    Ok(exit_code(!report.failed))
}

// ── check ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub question: String,
    pub expected: String,
    pub correct: bool,
    pub points: u32,
}

pub fn check_answer(ctx: &EngineContext, args: &CheckArgs, tier: &ThresholdTier) -> Result<CheckOutcome> {
    let challenge = ctx
        .generate_level_seeded(args.level, tier, args.seed)
        .with_context(|| format!("failed to generate level {}", args.level))?;

    let question = &challenge.question;
    let correct = evaluate_answer(question, &args.answer);
    let points = if correct {
        award_points(&challenge.pattern_meta, args.attempts)
    } else {
        0
    };
    Ok(CheckOutcome {
        question: question.text.clone(),
        expected: question.answer.to_string(),
        correct,
        points,
    })
}

pub fn check(run: &RunConfig, args: &CheckArgs) -> Result<ExitCode> {
    let ctx = load_context(&run.rules_dir)?;
    let tier = run.tier(args.tier);
    let outcome = check_answer(&ctx, args, &tier)?;

    println!("Level {} ({}), seed {}", args.level, tier.name, args.seed);
    println!("Question: {}", outcome.question);
    println!("Answer:   {}", args.answer);
    if outcome.correct {
        println!("Correct! +{} points", outcome.points);
    } else {
        println!("Incorrect. Expected: {}", outcome.expected);
    }
    Ok(exit_code(outcome.correct))
}

// ── lens ────────────────────────────────────────────────────────

pub fn lens(run: &RunConfig, args: &LensArgs) -> Result<ExitCode> {
    let mode: LensMode = args.mode.parse()?;
    let ctx = load_context(&run.rules_dir)?;
    let tier = run.tier(args.tier);
    let challenge = ctx
        .generate_level_seeded(args.level, &tier, args.seed)
        .with_context(|| format!("failed to generate level {}", args.level))?;

    let view = apply_lens(mode, &challenge.dataset(), &challenge.analytics);
    print_json(&view, args.pretty || run.pretty)?;
    Ok(ExitCode::SUCCESS)
}
