//! Archive coverage analysis engine.
//!
//! Turns a batch of raw recording fragments fetched for one camera into a
//! structured coverage report: window totals, gap statistics and per-day
//! timelines. The analyzer is a pure function of its inputs - it performs no
//! I/O, keeps no state between calls and takes the reference instant `now`
//! as an argument, so results are deterministic and the current partial day
//! can be clamped without reading a system clock.
//!
//! ## Key Concepts
//!
//! - **Fragment**: one contiguous recorded interval `[since, till)` in epoch
//!   seconds, as reported by the camera service. The source may return them
//!   unsorted, overlapping or empty.
//! - **Gap**: inferred no-recording interval between two fragments sorted by
//!   start time. Discontinuities of 60 seconds or less are treated as
//!   encoder jitter and ignored.
//! - **Day bucket**: per-local-calendar-day aggregation. The still-running
//!   current day uses `now` instead of midnight as its denominator end.

use crate::libs::formatter::{format_duration, time_of_day};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discontinuities up to this many seconds are considered continuous recording.
pub const GAP_NOISE_THRESHOLD: i64 = 60;

/// Minimum rendered width of a timeline segment, in percent of the 24h axis,
/// so single-instant fragments remain visible.
pub const MIN_SEGMENT_WIDTH_PCT: f64 = 0.3;

const DAY_SECS: i64 = 86400;

/// One contiguous recorded video interval reported by the camera service.
///
/// Half-open `[since, till)`. `till > since` is expected but not guaranteed
/// by the source; malformed fragments flow through the arithmetic unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub since: i64,
    pub till: i64,
}

/// Visual segment of a day timeline, positioned on a 24-hour percent axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Offset from local midnight, 0-100.
    pub left: f64,
    /// Width on the axis, floored at [`MIN_SEGMENT_WIDTH_PCT`].
    pub width: f64,
    /// "HH:MM:SS — HH:MM:SS (duration)" label for the segment.
    pub title: String,
}

/// Aggregation of fragments and gaps for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    /// Local date in "YYYY-MM-DD" format.
    pub date: String,
    pub fragments: usize,
    /// Recorded seconds attributed to this day by fragment start time.
    pub recorded: i64,
    pub recorded_h: f64,
    pub coverage_pct: f64,
    pub gaps_count: usize,
    pub max_gap: i64,
    pub timeline: Vec<TimelineSegment>,
}

/// Coverage report over the full requested window.
///
/// Constructed fresh on every [`analyze`] call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveReport {
    pub total_fragments: usize,
    /// Age in days of the oldest fragment relative to `now`.
    pub depth_days: f64,
    /// Sum of fragment durations in seconds, overlaps not deduplicated.
    pub total_recorded: i64,
    /// `latest.till - earliest.since` after sorting by start time.
    pub total_span: i64,
    pub coverage_pct: f64,
    pub avg_fragment: f64,
    pub gaps_count: usize,
    pub max_gap: i64,
    pub total_gap_time: i64,
    /// Day buckets ascending by date.
    pub daily: Vec<DayBucket>,
}

impl ArchiveReport {
    /// All-zero report used when a camera has no fragments in the window.
    pub fn empty() -> Self {
        Self {
            total_fragments: 0,
            depth_days: 0.0,
            total_recorded: 0,
            total_span: 0,
            coverage_pct: 0.0,
            avg_fragment: 0.0,
            gaps_count: 0,
            max_gap: 0,
            total_gap_time: 0,
            daily: Vec::new(),
        }
    }
}

/// Per-day accumulator filled during the bucketing pass.
#[derive(Default)]
struct DayAcc {
    recorded: i64,
    fragments: Vec<Fragment>,
    gaps: Vec<i64>,
}

/// Analyzes a batch of recording fragments against the reference instant `now`.
///
/// Fragments may be empty, unsorted, overlapping or zero-length; the input
/// order never affects the result. The function is total: it raises no
/// errors and always returns a well-formed (possibly all-zero) report.
///
/// Note on the window end: `total_span` takes the `till` of the fragment
/// that *starts* last, which is not necessarily the maximum `till` when
/// fragments overlap. This matches the upstream behavior consumers rely on.
pub fn analyze(fragments: &[Fragment], now: i64) -> ArchiveReport {
    if fragments.is_empty() {
        return ArchiveReport::empty();
    }

    let mut sorted = fragments.to_vec();
    sorted.sort_by_key(|f| f.since);

    let earliest = sorted[0].since;
    let latest = sorted[sorted.len() - 1].till;
    let total_span = latest - earliest;
    let total_recorded: i64 = sorted.iter().map(|f| f.till - f.since).sum();
    let depth_days = (now - earliest) as f64 / DAY_SECS as f64;

    let mut gaps = Vec::new();
    for pair in sorted.windows(2) {
        let gap = pair[1].since - pair[0].till;
        if gap > GAP_NOISE_THRESHOLD {
            gaps.push(gap);
        }
    }

    // Bucket fragments by the local calendar date of their start time.
    let mut days: BTreeMap<NaiveDate, DayAcc> = BTreeMap::new();
    for f in &sorted {
        let acc = days.entry(local_date(f.since)).or_default();
        acc.recorded += f.till - f.since;
        acc.fragments.push(*f);
    }

    // A gap belongs to the day recording resumed, i.e. the second fragment.
    for pair in sorted.windows(2) {
        let gap = pair[1].since - pair[0].till;
        if gap > GAP_NOISE_THRESHOLD {
            days.entry(local_date(pair[1].since)).or_default().gaps.push(gap);
        }
    }

    let daily = days.iter().map(|(date, acc)| build_day_bucket(*date, acc, now)).collect();

    ArchiveReport {
        total_fragments: sorted.len(),
        depth_days: round1(depth_days),
        total_recorded,
        total_span,
        coverage_pct: if total_span != 0 {
            round1(total_recorded as f64 / total_span as f64 * 100.0)
        } else {
            0.0
        },
        avg_fragment: total_recorded as f64 / sorted.len() as f64,
        gaps_count: gaps.len(),
        max_gap: gaps.iter().copied().max().unwrap_or(0),
        total_gap_time: gaps.iter().sum(),
        daily,
    }
}

fn build_day_bucket(date: NaiveDate, acc: &DayAcc, now: i64) -> DayBucket {
    // A date without a local midnight (DST edge) gets no denominator and no
    // timeline, but the raw counts are still reported.
    let (coverage_pct, timeline) = match local_day_start(date) {
        Some(day_start) => {
            let day_end = day_start + DAY_SECS;
            let effective_end = day_end.min(now);
            let day_span = effective_end - day_start;

            let timeline = acc
                .fragments
                .iter()
                .filter_map(|f| clip_segment(f, day_start, day_end))
                .collect();

            let coverage = if day_span > 0 {
                acc.recorded as f64 / day_span as f64 * 100.0
            } else {
                0.0
            };
            (round1(coverage), timeline)
        }
        None => (0.0, Vec::new()),
    };

    DayBucket {
        date: date.format("%Y-%m-%d").to_string(),
        fragments: acc.fragments.len(),
        recorded: acc.recorded,
        recorded_h: round1(acc.recorded as f64 / 3600.0),
        coverage_pct,
        gaps_count: acc.gaps.len(),
        max_gap: acc.gaps.iter().copied().max().unwrap_or(0),
        timeline,
    }
}

/// Clips a fragment to `[day_start, day_end)` and renders it as a timeline
/// segment. Returns `None` when the clipped interval is empty or inverted.
fn clip_segment(f: &Fragment, day_start: i64, day_end: i64) -> Option<TimelineSegment> {
    let seg_start = f.since.max(day_start);
    let seg_end = f.till.min(day_end);
    if seg_end <= seg_start {
        return None;
    }

    let left = (seg_start - day_start) as f64 / DAY_SECS as f64 * 100.0;
    let width = (seg_end - seg_start) as f64 / DAY_SECS as f64 * 100.0;
    Some(TimelineSegment {
        left: round2(left),
        width: round2(width.max(MIN_SEGMENT_WIDTH_PCT)),
        title: format!(
            "{} — {} ({})",
            time_of_day(seg_start),
            time_of_day(seg_end),
            format_duration(seg_end - seg_start)
        ),
    })
}

/// Local calendar date of an epoch timestamp.
fn local_date(ts: i64) -> NaiveDate {
    local_datetime(ts).date_naive()
}

pub(crate) fn local_datetime(ts: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local)
}

/// Epoch timestamp of local midnight for the given date, when one exists.
fn local_day_start(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map(|dt| dt.timestamp())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
