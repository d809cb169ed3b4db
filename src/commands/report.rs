use crate::libs::config::Config;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::fleet::Fleet;
use crate::libs::messages::Message;
use crate::libs::pool::{analyze_fleet, CancelToken};
use crate::{msg_bail_anyhow, msg_info, msg_print, msg_warning};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long, help = "Analysis window in days (defaults to the configured period)")]
    days: Option<u32>,
    #[arg(long, help = "Concurrent fetch workers")]
    workers: Option<usize>,
    #[arg(long, value_enum, default_value = "xlsx", help = "Output format")]
    format: ExportFormat,
    #[arg(short, long, help = "Output file path")]
    output: Option<PathBuf>,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let mut config = Config::read()?;
    if config.api.api_key.is_empty() {
        msg_bail_anyhow!(Message::ApiKeyMissing);
    }
    if let Some(days) = args.days {
        config.report.period_days = days;
    }
    if let Some(workers) = args.workers {
        config.report.workers = workers;
    }

    msg_print!(Message::ReportHeader(config.report.period_days), true);

    let fleet = Fleet::new(&config)?;
    msg_info!(Message::FetchingCameras);
    let cameras = fleet.cameras().await?;
    msg_print!(Message::CamerasFound(cameras.len()));
    msg_print!(Message::ReportWorkers(config.report.workers, config.report.max_retries));

    let token = CancelToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            msg_warning!(Message::ReportInterrupted);
            ctrl_c_token.cancel();
        }
    });

    let now = Utc::now().timestamp();
    let outcome = analyze_fleet(fleet.client(), cameras, now, &config.report, token).await;
    msg_print!(Message::ReportDone(outcome.results.len(), outcome.errors));
    if outcome.cancelled {
        msg_bail_anyhow!(Message::ReportInterrupted);
    }

    let problems = outcome
        .results
        .iter()
        .filter(|e| config.report.policy.is_problem(&e.report))
        .count();

    let exporter = Exporter::new(args.format, args.output, config.report.policy.clone(), config.report.period_days);
    exporter.export(&outcome.results)?;
    msg_print!(Message::ProblemCameras(problems));
    Ok(())
}
