//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `titidy tidy FILES...`: tidy scripts and write them out
//! - `titidy check FILES...`: report scripts that are not tidy
//! - `titidy stats`: run log summary
//! - `titidy config show|init|set|reset`: configuration management

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;

use crate::analytics::logger::{self, RunLogEntry};
use crate::analytics::reporter::{self, Stats};
use crate::config::{self, TidyConfig};
use crate::pipeline::{Pipeline, TidyOutput};
use crate::script;

/// Output format for analytics commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// titidy tidy
// ---------------------------------------------------------------------------

/// Where tidied scripts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Write into a directory, named after the input unless `outfile` is set.
    Directory {
        outdir: PathBuf,
        outfile: Option<String>,
    },
    /// Overwrite each input file.
    InPlace,
    /// Stream to the console.
    Stdout,
}

/// Options for `titidy tidy`.
#[derive(Debug, Clone)]
pub struct TidyOptions {
    pub files: Vec<PathBuf>,
    pub outdir: Option<PathBuf>,
    pub outfile: Option<String>,
    pub stdout: bool,
    pub in_place: bool,
    pub part: String,
}

impl TidyOptions {
    /// Resolve the destination, falling back to the configured outdir.
    pub fn destination(&self, cfg: &TidyConfig) -> Result<Destination> {
        if self.outfile.is_some() && self.files.len() > 1 {
            anyhow::bail!("--outfile can only be used with a single input file");
        }
        if self.in_place && self.files.iter().any(|f| is_stdin(f)) {
            anyhow::bail!("--in-place cannot be used when reading from stdin");
        }

        if self.stdout {
            return Ok(Destination::Stdout);
        }
        if self.in_place {
            return Ok(Destination::InPlace);
        }

        let outdir = self
            .outdir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.output.outdir));

        let mut targets: HashMap<PathBuf, &Path> = HashMap::new();
        for file in &self.files {
            let target =
                script::output_path(file, &outdir, self.outfile.as_deref(), &cfg.output.suffix);
            if let Some(first) = targets.insert(target.clone(), file.as_path()) {
                anyhow::bail!(
                    "{} and {} would both be written to {}",
                    first.display(),
                    file.display(),
                    target.display()
                );
            }
        }

        Ok(Destination::Directory {
            outdir,
            outfile: self.outfile.clone(),
        })
    }
}

/// Tidy every input file and write the results.
///
/// A file that cannot be read or written is reported and skipped; the
/// command fails at the end if any file failed.
pub fn run_tidy(opts: &TidyOptions) -> Result<()> {
    let cfg = config::load();
    let destination = opts.destination(&cfg)?;
    let pipeline = Pipeline::with_stages(cfg.style_context(), &cfg.stages.enabled());

    let mut failures = 0usize;
    for file in &opts.files {
        let started = Instant::now();
        let label = file.display().to_string();

        match tidy_file(&pipeline, &cfg, file, &destination) {
            Ok((output, written)) => {
                let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                logger::log_run(
                    &cfg.logging,
                    &RunLogEntry::completed(&label, &opts.part, &output, duration_ms),
                );
                if let Some(path) = written {
                    print_tidy_result(&label, &path, &output);
                }
            }
            Err(err) => {
                failures += 1;
                logger::log_run(&cfg.logging, &RunLogEntry::failed(&label, &opts.part, &err));
                eprintln!("{} {} {:#}", "✗".red().bold(), label, err);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} scripts failed", opts.files.len());
    }
    Ok(())
}

/// Read, tidy and write one script. Returns the report and the written path
/// (`None` when streamed to stdout).
fn tidy_file(
    pipeline: &Pipeline,
    cfg: &TidyConfig,
    file: &Path,
    destination: &Destination,
) -> Result<(TidyOutput, Option<PathBuf>)> {
    let lines = script::read_script(file)?;
    let output = pipeline.run(lines);
    let ending = cfg.output.line_ending;

    let written = match destination {
        Destination::Stdout => {
            script::print_script(&output.lines, ending)?;
            None
        }
        Destination::InPlace => {
            script::write_script(file, &output.lines, ending)?;
            Some(file.to_path_buf())
        }
        Destination::Directory { outdir, outfile } => {
            let path = script::output_path(file, outdir, outfile.as_deref(), &cfg.output.suffix);
            script::write_script(&path, &output.lines, ending)?;
            Some(path)
        }
    };

    Ok((output, written))
}

fn print_tidy_result(label: &str, path: &Path, output: &TidyOutput) {
    let detail = if output.is_changed() {
        format!(
            "{} lines changed, {} removed",
            output.lines_changed,
            output.lines_in.saturating_sub(output.lines_out)
        )
    } else {
        "already tidy".to_string()
    };
    eprintln!(
        "{} {} → {} {}",
        "✓".green().bold(),
        label,
        path.display(),
        detail.dimmed()
    );
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new(script::STDIN_PATH)
}

// ---------------------------------------------------------------------------
// titidy check
// ---------------------------------------------------------------------------

/// Outcome of checking a set of scripts.
#[derive(Debug, Default)]
struct CheckReport {
    /// Scripts that would change, with their rewritten line counts.
    would_change: Vec<(PathBuf, usize)>,
    unchanged: usize,
    failed: Vec<(PathBuf, anyhow::Error)>,
}

/// Run the pipeline over every script without writing anything.
///
/// A script that cannot be read is recorded and the rest are still checked.
fn check_files(pipeline: &Pipeline, files: &[PathBuf]) -> CheckReport {
    let mut report = CheckReport::default();
    for file in files {
        match script::read_script(file) {
            Ok(lines) => {
                let output = pipeline.run(lines);
                if output.is_changed() {
                    report.would_change.push((file.clone(), output.lines_changed));
                } else {
                    report.unchanged += 1;
                }
            }
            Err(err) => report.failed.push((file.clone(), err)),
        }
    }
    report
}

/// Report scripts whose tidy output differs from their current content.
///
/// Returns `true` if any script would change. Unreadable scripts are
/// reported and fail the command after every other script was checked.
pub fn run_check(files: &[PathBuf]) -> Result<bool> {
    let cfg = config::load();
    let pipeline = Pipeline::with_stages(cfg.style_context(), &cfg.stages.enabled());
    let report = check_files(&pipeline, files);

    for (file, lines_changed) in &report.would_change {
        println!(
            "{} {} {}",
            "would tidy".yellow().bold(),
            file.display(),
            format!("({lines_changed} lines)").dimmed()
        );
    }
    for (file, err) in &report.failed {
        eprintln!("{} {} {:#}", "✗".red().bold(), file.display(), err);
    }

    let changed = report.would_change.len();
    let unchanged = report.unchanged;
    if changed == 0 {
        println!("{}", format!("{unchanged} scripts already tidy").green());
    } else {
        println!(
            "{}, {}",
            format!("{changed} scripts would be tidied").yellow(),
            format!("{unchanged} already tidy").dimmed()
        );
    }

    if !report.failed.is_empty() {
        anyhow::bail!("{} of {} scripts could not be read", report.failed.len(), files.len());
    }
    Ok(changed > 0)
}

// ---------------------------------------------------------------------------
// titidy stats
// ---------------------------------------------------------------------------

/// Show run log statistics.
pub fn run_stats(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let cfg = config::load();
    let Some(path) = logger::run_log_path(&cfg.logging) else {
        anyhow::bail!("could not resolve run log path '{}'", cfg.logging.path);
    };
    let stats = reporter::compute_stats(&path, days);

    if stats.total_runs == 0 {
        println!(
            "{}",
            "No data yet. Tidy some scripts to see stats.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_stats_json(&stats)?,
        OutputFormat::Csv => print_stats_csv(&stats),
        OutputFormat::Table => print_stats_table(&stats),
    }

    Ok(())
}

fn print_stats_table(stats: &Stats) {
    println!("{}", "titidy Run Report".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    println!("  {} {}", "Scripts processed:".bold(), stats.total_runs);
    println!("  {} {}", "Scripts changed:  ".bold(), stats.scripts_changed);
    if stats.failed_runs > 0 {
        println!(
            "  {} {}",
            "Failed runs:      ".bold(),
            stats.failed_runs.to_string().red()
        );
    }
    println!(
        "  {} {}",
        "Lines read:       ".bold(),
        format_number(stats.total_lines_in)
    );
    println!(
        "  {} {}",
        "Lines rewritten:  ".bold(),
        format_number(stats.total_lines_changed)
    );
    println!(
        "  {} {}",
        "Lines removed:    ".bold(),
        format_number(stats.lines_removed())
    );
    println!();

    if !stats.part_stats.is_empty() {
        println!("{}", "By Part".bold().cyan());
        println!(
            "  {:<16} {:>6} {:>12} {:>12} {:>8}",
            "Part", "Runs", "Lines", "Rewritten", "Avg ms"
        );
        println!("  {}", "-".repeat(58));

        for (i, part) in stats.part_stats.iter().enumerate() {
            let line = format!(
                "  {:<16} {:>6} {:>12} {:>12} {:>8.1}",
                part.part,
                part.runs,
                format_number(part.lines_in),
                format_number(part.lines_changed),
                part.avg_duration_ms,
            );
            if i % 2 == 0 {
                println!("{line}");
            } else {
                println!("{}", line.dimmed());
            }
        }
    }
}

fn print_stats_json(stats: &Stats) -> Result<()> {
    let value = serde_json::json!({
        "total_runs": stats.total_runs,
        "failed_runs": stats.failed_runs,
        "scripts_changed": stats.scripts_changed,
        "total_lines_in": stats.total_lines_in,
        "total_lines_out": stats.total_lines_out,
        "total_lines_changed": stats.total_lines_changed,
        "parts": stats.part_stats.iter().map(|p| serde_json::json!({
            "part": p.part,
            "runs": p.runs,
            "lines_in": p.lines_in,
            "lines_changed": p.lines_changed,
            "avg_duration_ms": p.avg_duration_ms,
        })).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_stats_csv(stats: &Stats) {
    println!("part,runs,lines_in,lines_changed,avg_duration_ms");
    for p in &stats.part_stats {
        println!(
            "{},{},{},{},{:.1}",
            p.part, p.runs, p.lines_in, p.lines_changed, p.avg_duration_ms,
        );
    }
}

// ---------------------------------------------------------------------------
// titidy config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective titidy Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file().is_some_and(|p| p.exists());
    let project_exists = config::project_config_file().is_some_and(|p| p.exists());
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.titidy/config.toml", global_exists);
    print_source(".titidy.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "TITIDY_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.titidy/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {:?}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
