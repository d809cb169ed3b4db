use crate::libs::analyzer::analyze;
use crate::libs::config::Config;
use crate::libs::fleet::Fleet;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_warning};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct CameraArgs {
    #[arg(help = "Camera UID")]
    uid: String,
    #[arg(long, default_value_t = 90, help = "Archive window in days")]
    days: u32,
}

pub async fn cmd(args: CameraArgs) -> Result<()> {
    let config = Config::read()?;
    if config.api.api_key.is_empty() {
        msg_bail_anyhow!(Message::ApiKeyMissing);
    }

    let fleet = Fleet::new(&config)?;
    let Some(camera) = fleet.camera(&args.uid).await? else {
        msg_bail_anyhow!(Message::CameraNotFound(args.uid));
    };

    let now = Utc::now().timestamp();
    let since = now - args.days as i64 * 86400;

    // A camera with an unreachable archive still gets a (zero-metric) view.
    let fragments = match fleet.client().get_camera_fragments(&camera.uid, since, now).await {
        Ok(fragments) => fragments,
        Err(e) => {
            msg_warning!(Message::ReportFetchError(camera.uid.clone(), e.to_string()));
            Vec::new()
        }
    };
    let report = analyze(&fragments, now);

    View::camera_detail(&camera)?;
    println!("\nArchive, last {} days:", args.days);
    View::archive(&report)
}
