//! Fleet-wide camera statistics.
//!
//! Aggregates the raw inventory into the figures the dashboard shows:
//! online/offline counts, breakdowns by vendor, model and data center,
//! cameras with memory-card problems and cameras offline long enough to
//! warrant attention.

use crate::api::models::Camera;
use serde::Serialize;
use std::collections::BTreeMap;

/// Cameras offline longer than this many seconds are listed separately.
pub const LONG_OFFLINE_THRESHOLD: i64 = 3600;

const TOP_VENDORS: usize = 10;
const MEMORY_ISSUES_CAP: usize = 20;
const LONG_OFFLINE_CAP: usize = 10;

/// Online/offline split within one breakdown group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
}

impl StatusCount {
    fn add(&mut self, is_online: bool) {
        self.total += 1;
        if is_online {
            self.online += 1;
        } else {
            self.offline += 1;
        }
    }
}

/// Aggregate fleet snapshot derived from the camera inventory.
#[derive(Debug, Clone, Serialize)]
pub struct FleetSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub online_pct: f64,
    pub offline_pct: f64,
    pub by_vendor: BTreeMap<String, StatusCount>,
    /// Vendors by fleet share, largest first, capped at ten.
    pub top_vendors: Vec<(String, StatusCount)>,
    pub by_model: BTreeMap<String, StatusCount>,
    pub by_dc: BTreeMap<String, StatusCount>,
    /// Cameras whose memory card reports a problem state, capped at twenty.
    pub memory_issues: Vec<Camera>,
    /// Cameras offline for over an hour with their offline duration in
    /// seconds, longest first, capped at ten.
    pub long_offline: Vec<(Camera, i64)>,
}

/// Computes the fleet summary for a batch of cameras at instant `now`.
pub fn compute_summary(cameras: &[Camera], now: i64) -> FleetSummary {
    let total = cameras.len();
    let online = cameras.iter().filter(|c| c.is_online).count();
    let offline = total - online;

    let mut by_vendor: BTreeMap<String, StatusCount> = BTreeMap::new();
    let mut by_model: BTreeMap<String, StatusCount> = BTreeMap::new();
    let mut by_dc: BTreeMap<String, StatusCount> = BTreeMap::new();
    let mut memory_issues = Vec::new();
    let mut long_offline = Vec::new();

    for cam in cameras {
        by_vendor.entry(cam.vendor_name().to_string()).or_default().add(cam.is_online);
        by_model.entry(cam.model_name().to_string()).or_default().add(cam.is_online);
        by_dc.entry(cam.dc_name().to_string()).or_default().add(cam.is_online);

        if cam.has_memory_issue() {
            memory_issues.push(cam.clone());
        }

        if !cam.is_online {
            if let Some(offline_since) = cam.offline_since {
                let duration = now - offline_since;
                if duration > LONG_OFFLINE_THRESHOLD {
                    long_offline.push((cam.clone(), duration));
                }
            }
        }
    }

    long_offline.sort_by(|a, b| b.1.cmp(&a.1));
    long_offline.truncate(LONG_OFFLINE_CAP);
    memory_issues.truncate(MEMORY_ISSUES_CAP);

    let mut top_vendors: Vec<(String, StatusCount)> =
        by_vendor.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    top_vendors.sort_by(|a, b| b.1.total.cmp(&a.1.total));
    top_vendors.truncate(TOP_VENDORS);

    FleetSummary {
        total,
        online,
        offline,
        online_pct: share_pct(online, total),
        offline_pct: share_pct(offline, total),
        by_vendor,
        top_vendors,
        by_model,
        by_dc,
        memory_issues,
        long_offline,
    }
}

fn share_pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}
