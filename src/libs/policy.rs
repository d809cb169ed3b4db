//! Presentation-level quality thresholds.
//!
//! The analyzer reports raw coverage figures; what counts as "good", "low"
//! or "a problem" is policy applied by the report consumers. Thresholds live
//! in the configuration so they can change without touching the analyzer
//! contract.

use crate::libs::analyzer::ArchiveReport;
use crate::libs::formatter::format_duration;
use serde::{Deserialize, Serialize};

/// Coverage bands used for coloring report cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBand {
    Good,
    Fair,
    Poor,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProblemPolicy {
    /// Coverage at or above this is "good".
    pub good_coverage_pct: f64,
    /// Coverage below this flags the camera as a problem.
    pub problem_coverage_pct: f64,
    /// A single gap longer than this many seconds flags the camera.
    pub problem_max_gap_secs: i64,
    /// Archive depth below this many days flags the camera.
    pub problem_depth_days: f64,
}

impl Default for ProblemPolicy {
    fn default() -> Self {
        Self {
            good_coverage_pct: 90.0,
            problem_coverage_pct: 50.0,
            problem_max_gap_secs: 3600,
            problem_depth_days: 1.0,
        }
    }
}

impl ProblemPolicy {
    pub fn coverage_band(&self, coverage_pct: f64) -> CoverageBand {
        if coverage_pct >= self.good_coverage_pct {
            CoverageBand::Good
        } else if coverage_pct >= self.problem_coverage_pct {
            CoverageBand::Fair
        } else {
            CoverageBand::Poor
        }
    }

    /// Whether the archive report fails any threshold.
    pub fn is_problem(&self, report: &ArchiveReport) -> bool {
        report.total_fragments == 0
            || report.coverage_pct < self.problem_coverage_pct
            || report.max_gap > self.problem_max_gap_secs
            || report.depth_days < self.problem_depth_days
    }

    /// Human-readable reasons a camera is flagged, in threshold order.
    pub fn problem_reasons(&self, report: &ArchiveReport) -> Vec<String> {
        let mut reasons = Vec::new();
        if report.total_fragments == 0 {
            reasons.push("No archive".to_string());
        }
        if report.coverage_pct < self.problem_coverage_pct {
            reasons.push(format!("Low coverage ({}%)", report.coverage_pct));
        }
        if report.max_gap > self.problem_max_gap_secs {
            reasons.push(format!("Long gap ({})", format_duration(report.max_gap)));
        }
        if report.depth_days > 0.0 && report.depth_days < self.problem_depth_days {
            reasons.push(format!("Shallow depth ({}d)", report.depth_days));
        }
        reasons
    }
}
