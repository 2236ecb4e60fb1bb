//! CLI entrypoint for the libmx conformance harness.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use libmx_harness::error::parse_f64;
use libmx_harness::runner::execute;
use libmx_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, StreamKind, now_utc,
    validate_log_file,
};
use libmx_harness::{
    FixtureSet, HarnessError, SweepConfig, TestRunner, VerificationResult, VerificationSummary,
    sweep,
};
use libmx_membrane::config::{SafetyLevel, pin_safety_level};

/// Conformance tooling for libmx.
#[derive(Debug, Parser)]
#[command(name = "libmx-harness")]
#[command(about = "Conformance testing harness for libmx")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one function at one argument and print value, sign, errno.
    Eval {
        /// Argument (`nan`, `inf`, `-inf` accepted).
        #[arg(long, allow_hyphen_values = true)]
        x: String,
        /// `lgamma_r`, `lgamma`, or `expm1`.
        #[arg(long, default_value = "lgamma_r")]
        function: String,
        /// Runtime mode (`strict` or `hardened`).
        #[arg(long, default_value = "strict")]
        mode: String,
    },
    /// Verify the kernels against a fixture file.
    Verify {
        /// Fixture JSON file.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Mode to run (`strict`, `hardened`, or `both`).
        #[arg(long, default_value = "both")]
        mode: String,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index output path (requires `--report`).
        #[arg(long)]
        artifact_index: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Sweep lgamma_r over a grid and check sign/status invariants.
    Sweep {
        #[arg(long, default_value_t = -40.0, allow_hyphen_values = true)]
        from: f64,
        #[arg(long, default_value_t = 40.0, allow_hyphen_values = true)]
        to: f64,
        #[arg(long, default_value_t = 8_000)]
        steps: u32,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// JSON report path (if omitted, prints a summary only).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn parse_modes(raw: &str) -> Vec<SafetyLevel> {
    if raw.eq_ignore_ascii_case("both") {
        vec![SafetyLevel::Strict, SafetyLevel::Hardened]
    } else {
        vec![SafetyLevel::from_str_loose(raw)]
    }
}

fn open_log(path: Option<&Path>, run_id: &str) -> std::io::Result<Option<LogEmitter>> {
    path.map(|p| {
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
        LogEmitter::to_file(p, run_id)
    })
    .transpose()
}

fn log_result(
    emitter: &mut LogEmitter,
    mode: SafetyLevel,
    result: &VerificationResult,
) -> std::io::Result<()> {
    let (level, outcome) = if result.passed {
        (LogLevel::Info, Outcome::Pass)
    } else {
        (LogLevel::Error, Outcome::Fail)
    };
    let mut entry = LogEntry::new("", level, "fixture.case")
        .with_stream(StreamKind::Conformance)
        .with_mode(mode.as_str())
        .with_outcome(outcome)
        .with_details(serde_json::json!({
            "case": result.case_name,
            "function": result.function,
            "expected": result.expected,
            "actual": result.actual,
        }));
    entry.symbol = Some(result.function.clone());
    emitter.emit_entry(entry)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Eval { x, function, mode } => {
            let level = SafetyLevel::from_str_loose(&mode);
            pin_safety_level(level);
            let x = parse_f64("x", &x)?;
            let run = execute(&function, x, level)?;
            let sign = run.sign.map_or_else(|| "-".to_string(), |s| s.to_string());
            println!(
                "{function}({x:?}) = {:?} sign={sign} errno={} mode={}",
                run.value,
                run.errno,
                level.as_str()
            );
        }
        Command::Verify {
            fixture,
            report,
            mode,
            log,
            artifact_index,
            timestamp,
        } => {
            eprintln!("Verifying against {}", fixture.display());
            let set = FixtureSet::from_file(&fixture)?;
            let mut emitter = open_log(log.as_deref(), "verify")?;

            let modes = parse_modes(&mode);
            let mut results = Vec::new();
            for level in &modes {
                pin_safety_level(*level);
                let runner = TestRunner::new("fixture-verify", *level);
                for result in runner.run(&set) {
                    if let Some(emitter) = emitter.as_mut() {
                        log_result(emitter, *level, &result)?;
                    }
                    results.push(result);
                }
            }

            let summary = VerificationSummary::from_results(results);
            if let Some(emitter) = emitter.as_mut() {
                let level = if summary.all_passed() {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                };
                let entry = LogEntry::new("", level, "fixture.summary")
                    .with_stream(StreamKind::Conformance)
                    .with_details(serde_json::json!({
                        "family": set.family,
                        "total": summary.total,
                        "passed": summary.passed,
                        "failed": summary.failed,
                    }));
                emitter.emit_entry(entry)?;
                emitter.flush()?;
            }

            let mode_label = modes
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("+");
            let ts = timestamp.unwrap_or_else(now_utc);
            let md = summary.to_markdown("fixture-verify", &mode_label, &ts);
            if let Some(report_path) = &report {
                std::fs::write(report_path, &md)?;
                eprintln!("Report written to {}", report_path.display());
                if let Some(index_path) = &artifact_index {
                    let mut index = ArtifactIndex::new("verify");
                    index.add_file(report_path, "report")?;
                    if let Some(log_path) = &log {
                        index.add_file(log_path, "log")?;
                    }
                    std::fs::write(index_path, index.to_json()?)?;
                }
            } else {
                print!("{md}");
            }

            eprintln!(
                "{}/{} passed ({} failed)",
                summary.passed, summary.total, summary.failed
            );
            if !summary.all_passed() {
                std::process::exit(1);
            }
        }
        Command::Sweep {
            from,
            to,
            steps,
            log,
            output,
        } => {
            let config = SweepConfig { from, to, steps };
            let started = Instant::now();
            let report = sweep::run_sweep(&config)?;
            let elapsed = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

            if let Some(mut emitter) = open_log(log.as_deref(), "sweep")? {
                for v in &report.violations {
                    let entry = LogEntry::new("", LogLevel::Error, "sweep.violation")
                        .with_stream(StreamKind::Sweep)
                        .with_outcome(Outcome::Fail)
                        .with_details(serde_json::json!({
                            "x": format!("{:?}", v.x),
                            "rule": v.rule,
                            "detail": v.detail,
                        }));
                    emitter.emit_entry(entry)?;
                }
                for b in &report.boundaries {
                    let outcome = if b.passed { Outcome::Pass } else { Outcome::Fail };
                    let entry = LogEntry::new("", LogLevel::Info, "sweep.boundary")
                        .with_stream(StreamKind::Sweep)
                        .with_call("lgamma", b.x, b.left)
                        .with_outcome(outcome)
                        .with_details(serde_json::json!({
                            "label": b.label,
                            "deviation": b.deviation,
                            "tolerance": b.tolerance,
                        }));
                    emitter.emit_entry(entry)?;
                }
                let outcome = if report.passed() {
                    Outcome::Pass
                } else {
                    Outcome::Fail
                };
                let entry = LogEntry::new("", LogLevel::Info, "sweep.summary")
                    .with_stream(StreamKind::Sweep)
                    .with_outcome(outcome)
                    .with_latency_ns(elapsed)
                    .with_details(serde_json::json!({
                        "points": report.points,
                        "poles": report.poles,
                        "violations": report.violations.len(),
                    }));
                emitter.emit_entry(entry)?;
                emitter.flush()?;
            }

            if let Some(path) = &output {
                std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
                eprintln!("Sweep report written to {}", path.display());
            }
            println!(
                "sweep [{from}, {to}] points={} poles={} violations={} boundaries_ok={}",
                report.points,
                report.poles,
                report.violations.len(),
                report.boundaries.iter().all(|b| b.passed)
            );
            if !report.passed() {
                std::process::exit(1);
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            if !errors.is_empty() {
                return Err(HarnessError::LogValidation {
                    count: errors.len(),
                }
                .into());
            }
            println!("{}: {lines} line(s) valid", log.display());
        }
    }

    Ok(())
}
