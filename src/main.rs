use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tracing::info;

use unfill::{reflow, Document, ReflowStats, RuleSet};

#[derive(Parser, Debug)]
#[command(name = "unfill")]
#[command(about = "Joins hard-wrapped prose paragraphs while leaving code and markup alone")]
#[command(version)]
struct Args {
    /// Documents to reflow; reads stdin and writes stdout when omitted
    files: Vec<PathBuf>,

    /// Forbidden-pattern profile to apply
    #[arg(long, value_enum, default_value = "reference-manual")]
    profile: Profile,

    /// Extra forbidden pattern appended to the profile's ruleset (repeatable)
    #[arg(long = "pattern")]
    patterns: Vec<String>,

    /// Rewrite each file in place instead of printing to stdout
    #[arg(long)]
    in_place: bool,

    /// Abort on first file error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long, default_value = "reflow_stats.json")]
    stats_out: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Profile {
    /// Reference-manual style documents (separator rules, code lines, deep indents)
    ReferenceManual,
    /// Inspection-panel style documents (section labels, code lines)
    InspectionPanel,
}

impl Profile {
    fn ruleset(self) -> Result<RuleSet> {
        match self {
            Profile::ReferenceManual => RuleSet::reference_manual(),
            Profile::InspectionPanel => RuleSet::inspection_panel(),
        }
    }
}

/// Per-file processing record written to the stats file
#[derive(Serialize, Debug, Clone)]
struct FileReport {
    path: String,
    bytes_in: u64,
    bytes_out: u64,
    processing_time_ms: u64,
    stats: ReflowStats,
    /// success, partial (reflow fault), or failed (I/O error)
    status: String,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging enables observability and debugging in production
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    // WHY: a malformed ruleset means the engine cannot run at all, so it
    // propagates instead of being contained like a per-paragraph fault
    let mut ruleset = args.profile.ruleset()?;
    for pattern in &args.patterns {
        ruleset.push_pattern(pattern)?;
    }
    info!(
        ruleset = ruleset.name(),
        patterns = ruleset.pattern_sources().len(),
        "Compiled ruleset"
    );

    let reports = if args.files.is_empty() {
        vec![reflow_stdin(&ruleset).await?]
    } else {
        reflow_files(&args, &ruleset).await?
    };

    let stats_json =
        serde_json::to_string_pretty(&reports).context("Failed to serialize run stats")?;
    tokio::fs::write(&args.stats_out, stats_json)
        .await
        .with_context(|| format!("Failed to write stats to {}", args.stats_out.display()))?;

    let joined: u64 = reports.iter().map(|r| r.stats.paragraphs_joined).sum();
    let breaks: u64 = reports.iter().map(|r| r.stats.breaks_removed).sum();
    let failed = reports.iter().filter(|r| r.status == "failed").count();
    eprintln!(
        "unfill v{}: {} document(s), {} paragraph(s) joined, {} break(s) removed",
        env!("CARGO_PKG_VERSION"),
        reports.len(),
        joined,
        breaks
    );
    if failed > 0 {
        eprintln!("  {failed} document(s) failed; see {}", args.stats_out.display());
    }

    Ok(())
}

/// Filter stdin to stdout.
async fn reflow_stdin(ruleset: &RuleSet) -> Result<FileReport> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read stdin")?;

    let started = Instant::now();
    let mut document = Document::new(input);
    let bytes_in = document.len() as u64;
    let stats = reflow(&mut document, ruleset);
    notify_fault("<stdin>", &stats);

    let output = document.into_string();
    print!("{output}");

    Ok(FileReport {
        path: "-".to_string(),
        bytes_in,
        bytes_out: output.len() as u64,
        processing_time_ms: started.elapsed().as_millis() as u64,
        status: report_status(&stats),
        error: None,
        stats,
    })
}

/// Process each named file, in place or to stdout.
async fn reflow_files(args: &Args, ruleset: &RuleSet) -> Result<Vec<FileReport>> {
    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        progress.set_message(path.display().to_string());
        let report = reflow_one_file(path, ruleset, args.in_place).await;
        match report {
            Ok(report) => reports.push(report),
            Err(err) => {
                if args.fail_fast {
                    progress.finish_and_clear();
                    return Err(err.context(format!("Failed processing {}", path.display())));
                }
                eprintln!("unfill: skipping {}: {err:#}", path.display());
                reports.push(FileReport {
                    path: path.display().to_string(),
                    bytes_in: 0,
                    bytes_out: 0,
                    processing_time_ms: 0,
                    stats: ReflowStats::default(),
                    status: "failed".to_string(),
                    error: Some(format!("{err:#}")),
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(reports)
}

async fn reflow_one_file(path: &Path, ruleset: &RuleSet, in_place: bool) -> Result<FileReport> {
    let input = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let started = Instant::now();
    let mut document = Document::new(input);
    let bytes_in = document.len() as u64;
    let stats = reflow(&mut document, ruleset);
    notify_fault(&path.display().to_string(), &stats);

    let output = document.into_string();
    let bytes_out = output.len() as u64;
    if in_place {
        tokio::fs::write(path, &output)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        print!("{output}");
    }

    info!(
        path = %path.display(),
        bytes_in,
        bytes_out,
        paragraphs_joined = stats.paragraphs_joined,
        "Reflowed document"
    );

    Ok(FileReport {
        path: path.display().to_string(),
        bytes_in,
        bytes_out,
        processing_time_ms: started.elapsed().as_millis() as u64,
        status: report_status(&stats),
        error: None,
        stats,
    })
}

/// Surface a contained reflow fault as a non-fatal notice.
fn notify_fault(source: &str, stats: &ReflowStats) {
    if let Some(fault) = &stats.fault {
        eprintln!("unfill: {source}: reflow stopped early ({fault}); remaining text left as-is");
    }
}

fn report_status(stats: &ReflowStats) -> String {
    if stats.fault.is_some() {
        "partial".to_string()
    } else {
        "success".to_string()
    }
}
