use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::expand_home;
use crate::config::schema::LoggingConfig;
use crate::pipeline::TidyOutput;

// ---------------------------------------------------------------------------
// Run log entry (JSONL analytics)
// ---------------------------------------------------------------------------

/// A single entry in the run log (`~/.titidy/run-log.jsonl` by default).
///
/// One entry per script processed by `titidy tidy`. Used by the reporter for
/// `titidy stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLogEntry {
    pub timestamp: String,
    /// Input path as given on the command line (`-` for stdin).
    pub file: String,
    /// Script part label, e.g. `Prolog` or `Epilog`.
    #[serde(default = "default_part")]
    pub part: String,
    pub lines_in: usize,
    pub lines_out: usize,
    #[serde(default)]
    pub lines_changed: usize,
    /// Stages that ran, in order.
    #[serde(default)]
    pub stages: Vec<String>,
    #[serde(default)]
    pub duration_ms: u64,
    /// Whether the script was read and written successfully.
    #[serde(default = "default_true")]
    pub success: bool,
    /// Failure detail when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_part() -> String {
    crate::config::defaults::PART.to_string()
}

impl RunLogEntry {
    /// Entry for a completed run.
    pub fn completed(file: &str, part: &str, output: &TidyOutput, duration_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            file: file.to_string(),
            part: part.to_string(),
            lines_in: output.lines_in,
            lines_out: output.lines_out,
            lines_changed: output.lines_changed,
            stages: output.stages.iter().map(|s| (*s).to_string()).collect(),
            duration_ms,
            success: true,
            error: None,
        }
    }

    /// Entry for a run that failed before or after the pipeline.
    pub fn failed(file: &str, part: &str, error: &anyhow::Error) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            file: file.to_string(),
            part: part.to_string(),
            lines_in: 0,
            lines_out: 0,
            lines_changed: 0,
            stages: Vec::new(),
            duration_ms: 0,
            success: false,
            error: Some(format!("{error:#}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Append an entry to the run log, if logging is enabled.
///
/// Failures are swallowed: a broken log must never fail a tidy run.
pub fn log_run(config: &LoggingConfig, entry: &RunLogEntry) {
    if !config.enabled {
        return;
    }
    if let Some(path) = run_log_path(config) {
        let _ = append_log_entry(&path, entry);
    }
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all run log entries.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries(path: &Path) -> Vec<RunLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RunLogEntry>(&line).ok())
        .collect()
}

/// Read log entries filtered to a time window (last N days).
///
/// If `days` is `None`, returns all entries.
pub fn read_entries_since_days(path: &Path, days: Option<u32>) -> Vec<RunLogEntry> {
    let entries = read_all_entries(path);

    let Some(days) = days else {
        return entries;
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
    let cutoff_str = cutoff.to_rfc3339();

    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff_str)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_log_entry(path: &Path, entry: &RunLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Return the path to the run log file.
pub fn run_log_path(config: &LoggingConfig) -> Option<PathBuf> {
    expand_home(&config.path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("titidy-log-{}-{name}.jsonl", std::process::id()))
    }

    fn sample_output() -> TidyOutput {
        TidyOutput {
            lines: vec!["IF(a);".to_string()],
            lines_in: 3,
            lines_out: 1,
            lines_changed: 1,
            stages: vec!["keywords", "indent"],
        }
    }

    #[test]
    fn log_and_read_back() {
        let path = temp_log("roundtrip");
        fs::remove_file(&path).ok();
        let config = LoggingConfig {
            enabled: true,
            path: path.to_string_lossy().into_owned(),
        };

        log_run(&config, &RunLogEntry::completed("a.ti", "Prolog", &sample_output(), 4));
        log_run(
            &config,
            &RunLogEntry::failed("b.ti", "Epilog", &anyhow::anyhow!("unreadable")),
        );

        let entries = read_all_entries(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].part, "Prolog");
        assert_eq!(entries[0].stages, vec!["keywords", "indent"]);
        assert!(!entries[1].success);
        assert_eq!(entries[1].error.as_deref(), Some("unreadable"));

        fs::remove_file(path).ok();
    }

    #[test]
    fn disabled_logging_writes_nothing() {
        let path = temp_log("disabled");
        fs::remove_file(&path).ok();
        let config = LoggingConfig {
            enabled: false,
            path: path.to_string_lossy().into_owned(),
        };

        log_run(&config, &RunLogEntry::completed("a.ti", "Data", &sample_output(), 1));
        assert!(!path.exists());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let path = temp_log("malformed");
        let good = serde_json::to_string(&RunLogEntry::completed(
            "a.ti",
            "Data",
            &sample_output(),
            2,
        ))
        .unwrap();
        fs::write(&path, format!("not json\n{good}\n{{\"half\": 1}}\n")).unwrap();

        assert_eq!(read_all_entries(&path).len(), 1);
        fs::remove_file(path).ok();
    }

    #[test]
    fn old_entries_fall_outside_window() {
        let path = temp_log("window");
        let mut old = RunLogEntry::completed("a.ti", "Data", &sample_output(), 2);
        old.timestamp = "2001-01-01T00:00:00+00:00".to_string();
        let new = RunLogEntry::completed("b.ti", "Data", &sample_output(), 2);
        let content = format!(
            "{}\n{}\n",
            serde_json::to_string(&old).unwrap(),
            serde_json::to_string(&new).unwrap()
        );
        fs::write(&path, content).unwrap();

        assert_eq!(read_entries_since_days(&path, None).len(), 2);
        let recent = read_entries_since_days(&path, Some(7));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].file, "b.ti");

        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_log_reads_empty() {
        assert!(read_all_entries(Path::new("/nonexistent/titidy/run-log.jsonl")).is_empty());
    }
}
