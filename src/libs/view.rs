use crate::api::models::{BakedArchive, Camera, Health};
use crate::libs::analyzer::{ArchiveReport, DayBucket};
use crate::libs::formatter::{format_duration, format_duration_f64};
use crate::libs::stats::FleetSummary;
use anyhow::Result;
use prettytable::{row, Table};

/// Width of the ASCII day-timeline bar, in cells.
const BAR_WIDTH: usize = 48;

pub struct View {}

impl View {
    pub fn cameras(cameras: &[Camera]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["NAME", "UID", "VENDOR", "MODEL", "DC", "STATUS", "ADDRESS"]);
        for cam in cameras {
            table.add_row(row![
                cam.display_name(),
                cam.uid,
                cam.vendor_name(),
                cam.model_name(),
                cam.dc_name(),
                if cam.is_online { "Online" } else { "Offline" },
                cam.address.as_deref().unwrap_or(""),
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn camera_detail(camera: &Camera) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["Name", camera.display_name()]);
        table.add_row(row!["UID", camera.uid]);
        table.add_row(row!["SN", camera.sn.as_deref().unwrap_or("")]);
        table.add_row(row!["Vendor", camera.vendor_name()]);
        table.add_row(row!["Model", camera.model_name()]);
        table.add_row(row!["Address", camera.address.as_deref().unwrap_or("")]);
        table.add_row(row!["Data center", camera.dc_name()]);
        table.add_row(row!["Status", if camera.is_online { "Online" } else { "Offline" }]);
        if let Some(mc) = &camera.memory_card_state {
            table.add_row(row!["Memory card", mc.state]);
        }
        table.printstd();
        Ok(())
    }

    pub fn summary(summary: &FleetSummary, health: &Health) -> Result<()> {
        let mut overview = Table::new();
        overview.add_row(row!["Service health", health.status]);
        overview.add_row(row!["Total cameras", summary.total]);
        overview.add_row(row![
            "Online / Offline",
            format!(
                "{} ({}%) / {} ({}%)",
                summary.online, summary.online_pct, summary.offline, summary.offline_pct
            )
        ]);
        overview.printstd();

        println!("\nTop vendors:");
        let mut vendors = Table::new();
        vendors.add_row(row!["VENDOR", "TOTAL", "ONLINE", "OFFLINE"]);
        for (vendor, count) in &summary.top_vendors {
            vendors.add_row(row![vendor, count.total, count.online, count.offline]);
        }
        vendors.printstd();

        println!("\nBy data center:");
        let mut dcs = Table::new();
        dcs.add_row(row!["DATA CENTER", "TOTAL", "ONLINE", "OFFLINE"]);
        for (dc, count) in &summary.by_dc {
            dcs.add_row(row![dc, count.total, count.online, count.offline]);
        }
        dcs.printstd();

        if !summary.memory_issues.is_empty() {
            println!("\nMemory card issues:");
            let mut issues = Table::new();
            issues.add_row(row!["NAME", "UID", "STATE"]);
            for cam in &summary.memory_issues {
                let state = cam.memory_card_state.as_ref().map(|mc| mc.state.as_str()).unwrap_or("");
                issues.add_row(row![cam.display_name(), cam.uid, state]);
            }
            issues.printstd();
        }

        if !summary.long_offline.is_empty() {
            println!("\nOffline longer than an hour:");
            let mut offline = Table::new();
            offline.add_row(row!["NAME", "UID", "OFFLINE FOR"]);
            for (cam, duration) in &summary.long_offline {
                offline.add_row(row![cam.display_name(), cam.uid, format_duration(*duration)]);
            }
            offline.printstd();
        }

        Ok(())
    }

    pub fn archive(report: &ArchiveReport) -> Result<()> {
        let mut totals = Table::new();
        totals.add_row(row!["Fragments", report.total_fragments]);
        totals.add_row(row!["Archive depth", format!("{} days", report.depth_days)]);
        totals.add_row(row!["Recorded", format_duration(report.total_recorded)]);
        totals.add_row(row!["Coverage", format!("{}%", report.coverage_pct)]);
        totals.add_row(row![
            "Avg fragment",
            if report.total_fragments > 0 {
                format_duration_f64(report.avg_fragment)
            } else {
                "-".to_string()
            }
        ]);
        totals.add_row(row!["Gaps > 1m", report.gaps_count]);
        totals.add_row(row![
            "Max gap",
            if report.max_gap > 0 { format_duration(report.max_gap) } else { "-".to_string() }
        ]);
        totals.add_row(row![
            "Total gap time",
            if report.total_gap_time > 0 {
                format_duration(report.total_gap_time)
            } else {
                "-".to_string()
            }
        ]);
        totals.printstd();

        if !report.daily.is_empty() {
            println!("\nDaily coverage:");
            let mut daily = Table::new();
            daily.add_row(row!["DATE", "RECORDED", "COVERAGE", "FRAGMENTS", "GAPS", "MAX GAP", "TIMELINE"]);
            for day in &report.daily {
                daily.add_row(row![
                    day.date,
                    format!("{} h", day.recorded_h),
                    format!("{}%", day.coverage_pct),
                    day.fragments,
                    day.gaps_count,
                    if day.max_gap > 0 { format_duration(day.max_gap) } else { "-".to_string() },
                    timeline_bar(day),
                ]);
            }
            daily.printstd();
        }

        Ok(())
    }

    pub fn archives(archives: &[BakedArchive]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "CAMERA", "NAME", "STATUS", "UPDATED"]);
        for archive in archives {
            table.add_row(row![
                archive.id,
                archive.camera_uid.as_deref().unwrap_or(""),
                archive.name.as_deref().unwrap_or(""),
                archive.status.label(),
                archive.updated_at.as_deref().unwrap_or(""),
            ]);
        }
        table.printstd();
        Ok(())
    }
}

/// Renders the day's timeline segments onto a fixed-width character bar.
fn timeline_bar(day: &DayBucket) -> String {
    let mut cells = vec!['·'; BAR_WIDTH];
    for segment in &day.timeline {
        let start = (segment.left / 100.0 * BAR_WIDTH as f64).floor() as usize;
        let end = ((segment.left + segment.width) / 100.0 * BAR_WIDTH as f64).ceil() as usize;
        for cell in cells.iter_mut().take(end.min(BAR_WIDTH)).skip(start.min(BAR_WIDTH)) {
            *cell = '█';
        }
    }
    cells.into_iter().collect()
}
