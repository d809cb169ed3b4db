//! Duration and timestamp formatting for display.
//!
//! Converts raw second counts into the short human strings used in terminal
//! tables, timeline labels and spreadsheet cells. Durations scale their unit
//! with magnitude ("45 sec", "12 min", "2 h 5 min", "3 d 14 h") rather than
//! using a fixed clock format, since archive gaps range from seconds to days.

use crate::libs::analyzer::local_datetime;

/// Formats a second count as a short human-readable duration.
///
/// - under a minute: `"N sec"`
/// - under an hour: `"N min"`
/// - under a day: `"H h M min"`
/// - a day or more: `"D d H h"`
///
/// Negative inputs fall into the first branch and keep their sign; callers
/// display `-` for missing values instead of passing sentinel durations.
pub fn format_duration(seconds: i64) -> String {
    if seconds < 60 {
        format!("{} sec", seconds)
    } else if seconds < 3600 {
        format!("{} min", seconds / 60)
    } else if seconds < 86400 {
        format!("{} h {} min", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{} d {} h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

/// Same as [`format_duration`] but truncates a fractional second count first.
pub fn format_duration_f64(seconds: f64) -> String {
    format_duration(seconds as i64)
}

/// Local wall-clock time of an epoch timestamp, as "HH:MM:SS".
pub fn time_of_day(ts: i64) -> String {
    local_datetime(ts).format("%H:%M:%S").to_string()
}
