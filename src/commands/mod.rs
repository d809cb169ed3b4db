pub mod archives;
pub mod camera;
pub mod cameras;
pub mod init;
pub mod report;
pub mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Fleet summary dashboard")]
    Stats,
    #[command(about = "List cameras with filters")]
    Cameras(cameras::CamerasArgs),
    #[command(about = "Show one camera with its archive coverage")]
    Camera(camera::CameraArgs),
    #[command(about = "List baked archive export jobs")]
    Archives(archives::ArchivesArgs),
    #[command(about = "Generate a fleet archive integrity report")]
    Report(report::ReportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Stats => stats::cmd().await,
            Commands::Cameras(args) => cameras::cmd(args).await,
            Commands::Camera(args) => camera::cmd(args).await,
            Commands::Archives(args) => archives::cmd(args).await,
            Commands::Report(args) => report::cmd(args).await,
        }
    }
}
