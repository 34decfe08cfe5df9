//! Analytics reporter: aggregates the run log for `titidy stats`.
//!
//! Totals across all runs plus a per-part breakdown (Prolog, Metadata, Data,
//! Epilog, ...), sorted by how many lines each part had rewritten.

use std::collections::HashMap;
use std::path::Path;

use crate::analytics::logger::{self, RunLogEntry};

// ---------------------------------------------------------------------------
// Aggregated stats
// ---------------------------------------------------------------------------

/// Summary statistics for `titidy stats`.
#[derive(Debug)]
pub struct Stats {
    pub total_runs: usize,
    pub failed_runs: usize,
    /// Successful runs whose output differed from the input.
    pub scripts_changed: usize,
    pub total_lines_in: usize,
    pub total_lines_out: usize,
    pub total_lines_changed: usize,
    pub part_stats: Vec<PartStat>,
}

impl Stats {
    /// Lines removed (blank-line cap and hash lines) across all runs.
    pub fn lines_removed(&self) -> usize {
        self.total_lines_in.saturating_sub(self.total_lines_out)
    }
}

/// Per-part aggregated statistics.
#[derive(Debug, Clone)]
pub struct PartStat {
    pub part: String,
    pub runs: usize,
    pub lines_in: usize,
    pub lines_changed: usize,
    pub avg_duration_ms: f64,
}

// ---------------------------------------------------------------------------
// Stats computation
// ---------------------------------------------------------------------------

/// Compute aggregate stats from the run log at `path`, optionally filtered
/// to the last `days` days.
pub fn compute_stats(path: &Path, days: Option<u32>) -> Stats {
    let entries = logger::read_entries_since_days(path, days);
    build_stats(&entries)
}

fn build_stats(entries: &[RunLogEntry]) -> Stats {
    let succeeded: Vec<&RunLogEntry> = entries.iter().filter(|e| e.success).collect();

    Stats {
        total_runs: entries.len(),
        failed_runs: entries.len() - succeeded.len(),
        scripts_changed: succeeded
            .iter()
            .filter(|e| e.lines_changed > 0 || e.lines_in != e.lines_out)
            .count(),
        total_lines_in: succeeded.iter().map(|e| e.lines_in).sum(),
        total_lines_out: succeeded.iter().map(|e| e.lines_out).sum(),
        total_lines_changed: succeeded.iter().map(|e| e.lines_changed).sum(),
        part_stats: compute_part_stats(&succeeded),
    }
}

/// Group successful entries by part.
///
/// Returns sorted by lines changed (descending), then by part name.
fn compute_part_stats(entries: &[&RunLogEntry]) -> Vec<PartStat> {
    let mut groups: HashMap<&str, Vec<&RunLogEntry>> = HashMap::new();
    for &entry in entries {
        groups.entry(entry.part.as_str()).or_default().push(entry);
    }

    let mut stats: Vec<PartStat> = groups
        .into_iter()
        .map(|(part, group)| {
            let runs = group.len();
            let total_ms: u64 = group.iter().map(|e| e.duration_ms).sum();
            PartStat {
                part: part.to_string(),
                runs,
                lines_in: group.iter().map(|e| e.lines_in).sum(),
                lines_changed: group.iter().map(|e| e.lines_changed).sum(),
                avg_duration_ms: if runs == 0 {
                    0.0
                } else {
                    total_ms as f64 / runs as f64
                },
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.lines_changed
            .cmp(&a.lines_changed)
            .then_with(|| a.part.cmp(&b.part))
    });

    stats
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
