//! Report export in CSV, JSON and Excel formats.
//!
//! Takes the per-camera analysis results produced by the fleet workflow and
//! writes them out for distribution. The Excel workbook mirrors what the
//! operations team reads: a TLDR overview sheet, a per-camera summary, a
//! per-camera-day breakdown and a sheet of cameras failing the quality
//! policy. CSV carries the summary table only; JSON carries the complete
//! dataset.
//!
//! File naming follows the `camwatch_report_YYYYMMDD_HHMMSS.<ext>` pattern
//! when no explicit output path is given.

use crate::libs::analyzer::ArchiveReport;
use crate::libs::formatter::{format_duration, format_duration_f64};
use crate::libs::messages::Message;
use crate::libs::policy::{CoverageBand, ProblemPolicy};
use crate::libs::pool::CameraArchive;
use crate::msg_success;
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

// Workbook palette, shared across sheets.
const HEADER_BG: Color = Color::RGB(0x2B3E50);
const GREEN_BG: Color = Color::RGB(0xD4EDDA);
const YELLOW_BG: Color = Color::RGB(0xFFF3CD);
const RED_BG: Color = Color::RGB(0xF8D7DA);
const GRAY_BG: Color = Color::RGB(0xE2E3E5);
const ONLINE_FG: Color = Color::RGB(0x0F5132);
const OFFLINE_FG: Color = Color::RGB(0x842029);

/// Gaps above this but below the problem threshold get a warning tint.
const GAP_WARN_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
    policy: ProblemPolicy,
    period_days: u32,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, policy: ProblemPolicy, period_days: u32) -> Self {
        let default_name = format!("camwatch_report_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        };
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path, policy, period_days }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, data: &[CameraArchive]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(data)?,
            ExportFormat::Json => self.export_json(data)?,
            ExportFormat::Xlsx => self.export_xlsx(data)?,
        }
        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_csv(&self, data: &[CameraArchive]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(SUMMARY_HEADERS)?;
        for entry in data {
            wtr.write_record(&summary_row(entry))?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, data: &[CameraArchive]) -> Result<()> {
        let payload = serde_json::json!({
            "generated_at": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            "period_days": self.period_days,
            "cameras": data,
        });
        let json = serde_json::to_string_pretty(&payload)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_xlsx(&self, data: &[CameraArchive]) -> Result<()> {
        let mut workbook = Workbook::new();
        self.write_tldr_sheet(workbook.add_worksheet().set_name("TLDR")?, data)?;
        self.write_summary_sheet(workbook.add_worksheet().set_name("Summary")?, data)?;
        self.write_daily_sheet(workbook.add_worksheet().set_name("Daily")?, data)?;
        self.write_problems_sheet(workbook.add_worksheet().set_name("Problems")?, data)?;
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn write_tldr_sheet(&self, ws: &mut Worksheet, data: &[CameraArchive]) -> Result<()> {
        let title_format = Format::new().set_bold().set_font_size(14.0);
        let section_format = Format::new().set_bold().set_font_color(HEADER_BG);
        let value_format = Format::new().set_bold().set_font_size(12.0);
        let header_format = header_format();

        let total = data.len();
        let online = data.iter().filter(|e| e.camera.is_online).count();
        let with_archive = data.iter().filter(|e| e.report.total_fragments > 0).count();
        let no_archive = total - with_archive;

        let coverages: Vec<f64> = data
            .iter()
            .filter(|e| e.report.total_fragments > 0)
            .map(|e| e.report.coverage_pct)
            .collect();
        let avg_coverage = round1(mean(&coverages));
        let depths: Vec<f64> = data
            .iter()
            .filter(|e| e.report.total_fragments > 0)
            .map(|e| e.report.depth_days)
            .collect();
        let avg_depth = round1(mean(&depths));

        let good = coverages.iter().filter(|&&c| c >= self.policy.good_coverage_pct).count();
        let fair = coverages
            .iter()
            .filter(|&&c| c >= self.policy.problem_coverage_pct && c < self.policy.good_coverage_pct)
            .count();
        let poor = coverages
            .iter()
            .filter(|&&c| c > 0.0 && c < self.policy.problem_coverage_pct)
            .count();

        let mut row: u32 = 1;
        ws.write_string_with_format(row, 1, "Archive Quality Report", &title_format)?;
        row += 1;
        ws.write_string(
            row,
            1,
            &format!(
                "Period: last {} days  |  Generated: {}",
                self.period_days,
                Local::now().format("%Y-%m-%d %H:%M")
            ),
        )?;
        row += 2;

        ws.write_string_with_format(row, 1, "Overview", &section_format)?;
        row += 1;
        let overview: [(&str, String); 5] = [
            ("Total cameras", total.to_string()),
            ("Online / Offline", format!("{} / {}", online, total - online)),
            ("With archive / No archive", format!("{} / {}", with_archive, no_archive)),
            ("Avg coverage", format!("{}%", avg_coverage)),
            ("Avg archive depth", format!("{} days", avg_depth)),
        ];
        for (label, value) in overview {
            ws.write_string(row, 1, label)?;
            ws.write_string_with_format(row, 2, &value, &value_format)?;
            row += 1;
        }
        row += 1;

        ws.write_string_with_format(row, 1, "Quality Distribution", &section_format)?;
        row += 1;
        let dist: [(String, usize, Color); 4] = [
            (format!("Coverage >= {}%", self.policy.good_coverage_pct), good, GREEN_BG),
            (
                format!("Coverage {}-{}%", self.policy.problem_coverage_pct, self.policy.good_coverage_pct),
                fair,
                YELLOW_BG,
            ),
            (format!("Coverage < {}%", self.policy.problem_coverage_pct), poor, RED_BG),
            ("No archive".to_string(), no_archive, GRAY_BG),
        ];
        for (label, count, color) in dist {
            let fill = Format::new().set_bold().set_background_color(color);
            ws.write_string(row, 1, &label)?;
            ws.write_number_with_format(row, 2, count as f64, &fill)?;
            let pct = if total > 0 { round1(count as f64 / total as f64 * 100.0) } else { 0.0 };
            ws.write_string(row, 3, &format!("{}%", pct))?;
            row += 1;
        }
        row += 1;

        // Worst coverage.
        let mut worst: Vec<&CameraArchive> = data.iter().collect();
        worst.sort_by(|a, b| a.report.coverage_pct.total_cmp(&b.report.coverage_pct));
        row = self.write_tldr_table(
            ws,
            row,
            "Worst Coverage (top 10)",
            &["Name", "Vendor", "DC", "Coverage %", "Max Gap", "Gaps"],
            worst.iter().take(10).map(|e| {
                vec![
                    e.camera.display_name(),
                    e.camera.vendor_name().to_string(),
                    e.camera.dc_name().to_string(),
                    e.report.coverage_pct.to_string(),
                    gap_or_dash(e.report.max_gap),
                    e.report.gaps_count.to_string(),
                ]
            }),
            &section_format,
            &header_format,
        )?;

        // Most gaps by total lost time.
        let mut most_gaps: Vec<&CameraArchive> = data.iter().filter(|e| e.report.gaps_count > 0).collect();
        most_gaps.sort_by(|a, b| b.report.total_gap_time.cmp(&a.report.total_gap_time));
        row = self.write_tldr_table(
            ws,
            row,
            "Most Gaps (top 10)",
            &["Name", "Vendor", "DC", "Gaps", "Total Gap Time", "Coverage %"],
            most_gaps.iter().take(10).map(|e| {
                vec![
                    e.camera.display_name(),
                    e.camera.vendor_name().to_string(),
                    e.camera.dc_name().to_string(),
                    e.report.gaps_count.to_string(),
                    gap_or_dash(e.report.total_gap_time),
                    e.report.coverage_pct.to_string(),
                ]
            }),
            &section_format,
            &header_format,
        )?;

        // Longest single gap.
        let mut longest: Vec<&CameraArchive> = data.iter().filter(|e| e.report.max_gap > 0).collect();
        longest.sort_by(|a, b| b.report.max_gap.cmp(&a.report.max_gap));
        self.write_tldr_table(
            ws,
            row,
            "Longest Single Gap (top 10)",
            &["Name", "Vendor", "DC", "Max Gap", "Gaps", "Coverage %"],
            longest.iter().take(10).map(|e| {
                vec![
                    e.camera.display_name(),
                    e.camera.vendor_name().to_string(),
                    e.camera.dc_name().to_string(),
                    format_duration(e.report.max_gap),
                    e.report.gaps_count.to_string(),
                    e.report.coverage_pct.to_string(),
                ]
            }),
            &section_format,
            &header_format,
        )?;

        ws.autofit();
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn write_tldr_table<I>(
        &self,
        ws: &mut Worksheet,
        mut row: u32,
        title: &str,
        headers: &[&str],
        rows: I,
        section_format: &Format,
        header_format: &Format,
    ) -> Result<u32>
    where
        I: Iterator<Item = Vec<String>>,
    {
        ws.write_string_with_format(row, 1, title, section_format)?;
        row += 1;
        for (col, header) in headers.iter().enumerate() {
            ws.write_string_with_format(row, col as u16 + 1, *header, header_format)?;
        }
        row += 1;
        for cells in rows {
            for (col, value) in cells.iter().enumerate() {
                ws.write_string(row, col as u16 + 1, value)?;
            }
            row += 1;
        }
        Ok(row + 1)
    }

    fn write_summary_sheet(&self, ws: &mut Worksheet, data: &[CameraArchive]) -> Result<()> {
        let header = header_format();
        for (col, title) in SUMMARY_HEADERS.iter().enumerate() {
            ws.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (i, entry) in data.iter().enumerate() {
            let row = i as u32 + 1;
            let camera = &entry.camera;
            let report = &entry.report;

            ws.write_string(row, 0, &camera.display_name())?;
            ws.write_string(row, 1, &camera.uid)?;
            ws.write_string(row, 2, camera.sn.as_deref().unwrap_or(""))?;
            ws.write_string(row, 3, camera.vendor.as_deref().unwrap_or(""))?;
            ws.write_string(row, 4, camera.model.as_deref().unwrap_or(""))?;
            ws.write_string(row, 5, camera.address.as_deref().unwrap_or(""))?;
            ws.write_string(row, 6, camera.dc_name())?;
            ws.write_string_with_format(
                row,
                7,
                if camera.is_online { "Online" } else { "Offline" },
                &status_format(camera.is_online),
            )?;
            ws.write_number_with_format(row, 8, report.depth_days, &self.depth_format(report.depth_days))?;
            ws.write_number(row, 9, round1(report.total_recorded as f64 / 3600.0))?;
            ws.write_number_with_format(row, 10, report.coverage_pct, &self.coverage_format(report.coverage_pct))?;
            ws.write_number(row, 11, report.total_fragments as f64)?;
            ws.write_string(
                row,
                12,
                &if report.total_fragments > 0 {
                    format_duration_f64(report.avg_fragment)
                } else {
                    "-".to_string()
                },
            )?;
            ws.write_number(row, 13, report.gaps_count as f64)?;
            ws.write_string_with_format(row, 14, &gap_or_dash(report.max_gap), &self.gap_format(report.max_gap))?;
            ws.write_string(row, 15, &gap_or_dash(report.total_gap_time))?;
        }

        ws.set_freeze_panes(1, 0)?;
        ws.autofit();
        Ok(())
    }

    fn write_daily_sheet(&self, ws: &mut Worksheet, data: &[CameraArchive]) -> Result<()> {
        let header = header_format();
        let headers = ["Name", "UID", "Date", "Recorded (h)", "Coverage %", "Fragments", "Gaps > 1m", "Max Gap"];
        for (col, title) in headers.iter().enumerate() {
            ws.write_string_with_format(0, col as u16, *title, &header)?;
        }

        let mut row: u32 = 1;
        for entry in data {
            let name = entry.camera.display_name();
            for day in &entry.report.daily {
                ws.write_string(row, 0, &name)?;
                ws.write_string(row, 1, &entry.camera.uid)?;
                ws.write_string(row, 2, &day.date)?;
                ws.write_number(row, 3, day.recorded_h)?;
                ws.write_number_with_format(row, 4, day.coverage_pct, &self.coverage_format(day.coverage_pct))?;
                ws.write_number(row, 5, day.fragments as f64)?;
                ws.write_number(row, 6, day.gaps_count as f64)?;
                ws.write_string(row, 7, &gap_or_dash(day.max_gap))?;
                row += 1;
            }
        }

        ws.set_freeze_panes(1, 0)?;
        ws.autofit();
        Ok(())
    }

    fn write_problems_sheet(&self, ws: &mut Worksheet, data: &[CameraArchive]) -> Result<()> {
        let header = header_format();
        let headers = [
            "Name", "UID", "Vendor", "Model", "Address", "Data Center", "Status", "Depth (days)", "Coverage %",
            "Max Gap", "Reason",
        ];
        for (col, title) in headers.iter().enumerate() {
            ws.write_string_with_format(0, col as u16, *title, &header)?;
        }

        let reason_format = Format::new().set_background_color(RED_BG);
        let mut row: u32 = 1;
        for entry in data {
            if !self.policy.is_problem(&entry.report) {
                continue;
            }
            let reasons = self.policy.problem_reasons(&entry.report).join("; ");
            ws.write_string(row, 0, &entry.camera.display_name())?;
            ws.write_string(row, 1, &entry.camera.uid)?;
            ws.write_string(row, 2, entry.camera.vendor_name())?;
            ws.write_string(row, 3, entry.camera.model_name())?;
            ws.write_string(row, 4, entry.camera.address.as_deref().unwrap_or(""))?;
            ws.write_string(row, 5, entry.camera.dc_name())?;
            ws.write_string_with_format(
                row,
                6,
                if entry.camera.is_online { "Online" } else { "Offline" },
                &status_format(entry.camera.is_online),
            )?;
            ws.write_number(row, 7, entry.report.depth_days)?;
            ws.write_number_with_format(row, 8, entry.report.coverage_pct, &self.coverage_format(entry.report.coverage_pct))?;
            ws.write_string(row, 9, &gap_or_dash(entry.report.max_gap))?;
            ws.write_string_with_format(row, 10, &reasons, &reason_format)?;
            row += 1;
        }

        ws.set_freeze_panes(1, 0)?;
        ws.autofit();
        Ok(())
    }

    fn coverage_format(&self, pct: f64) -> Format {
        let color = match self.policy.coverage_band(pct) {
            CoverageBand::Good => GREEN_BG,
            CoverageBand::Fair => YELLOW_BG,
            CoverageBand::Poor => RED_BG,
        };
        Format::new().set_background_color(color)
    }

    fn depth_format(&self, depth_days: f64) -> Format {
        if depth_days < self.policy.problem_depth_days {
            Format::new().set_background_color(RED_BG)
        } else if depth_days < 3.0 {
            Format::new().set_background_color(YELLOW_BG)
        } else {
            Format::new()
        }
    }

    fn gap_format(&self, max_gap: i64) -> Format {
        if max_gap > self.policy.problem_max_gap_secs {
            Format::new().set_background_color(RED_BG)
        } else if max_gap > GAP_WARN_SECS {
            Format::new().set_background_color(YELLOW_BG)
        } else {
            Format::new()
        }
    }
}

const SUMMARY_HEADERS: [&str; 16] = [
    "Name", "UID", "SN", "Vendor", "Model", "Address", "Data Center", "Status", "Depth (days)", "Recorded (h)",
    "Coverage %", "Fragments", "Avg Fragment", "Gaps > 1m", "Max Gap", "Total Gap Time",
];

/// Summary row shared by the CSV writer and the Excel Summary sheet.
fn summary_row(entry: &CameraArchive) -> Vec<String> {
    let camera = &entry.camera;
    let report: &ArchiveReport = &entry.report;
    vec![
        camera.display_name(),
        camera.uid.clone(),
        camera.sn.clone().unwrap_or_default(),
        camera.vendor.clone().unwrap_or_default(),
        camera.model.clone().unwrap_or_default(),
        camera.address.clone().unwrap_or_default(),
        camera.data_center.as_ref().map(|dc| dc.name.clone()).unwrap_or_default(),
        if camera.is_online { "Online".to_string() } else { "Offline".to_string() },
        report.depth_days.to_string(),
        round1(report.total_recorded as f64 / 3600.0).to_string(),
        report.coverage_pct.to_string(),
        report.total_fragments.to_string(),
        if report.total_fragments > 0 { format_duration_f64(report.avg_fragment) } else { "-".to_string() },
        report.gaps_count.to_string(),
        gap_or_dash(report.max_gap),
        gap_or_dash(report.total_gap_time),
    ]
}

fn header_format() -> Format {
    Format::new().set_bold().set_font_color(Color::White).set_background_color(HEADER_BG)
}

fn status_format(is_online: bool) -> Format {
    if is_online {
        Format::new().set_bold().set_font_color(ONLINE_FG).set_background_color(GREEN_BG)
    } else {
        Format::new().set_bold().set_font_color(OFFLINE_FG).set_background_color(RED_BG)
    }
}

fn gap_or_dash(seconds: i64) -> String {
    if seconds > 0 {
        format_duration(seconds)
    } else {
        "-".to_string()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
