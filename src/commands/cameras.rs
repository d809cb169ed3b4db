use crate::libs::config::Config;
use crate::libs::fleet::Fleet;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use clap::Args;

const ITEMS_PER_PAGE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusFilter {
    Online,
    Offline,
}

#[derive(Debug, Args)]
pub struct CamerasArgs {
    #[arg(short, long, help = "Substring match on name, address, SN or UID")]
    query: Option<String>,
    #[arg(long, value_enum, help = "Filter by online status")]
    status: Option<StatusFilter>,
    #[arg(long, help = "Filter by vendor")]
    vendor: Option<String>,
    #[arg(long, help = "Filter by data center")]
    dc: Option<String>,
    #[arg(long, default_value_t = 1, help = "Result page")]
    page: usize,
}

pub async fn cmd(args: CamerasArgs) -> Result<()> {
    let config = Config::read()?;
    if config.api.api_key.is_empty() {
        msg_bail_anyhow!(Message::ApiKeyMissing);
    }

    let fleet = Fleet::new(&config)?;
    let cameras = fleet.cameras().await?;

    let query = args.query.as_deref().map(str::to_lowercase);
    let filtered: Vec<_> = cameras
        .into_iter()
        .filter(|cam| {
            if let Some(q) = &query {
                let matches = [
                    cam.name.as_deref(),
                    cam.address.as_deref(),
                    cam.sn.as_deref(),
                    Some(cam.uid.as_str()),
                ]
                .iter()
                .any(|field| field.is_some_and(|f| f.to_lowercase().contains(q)));
                if !matches {
                    return false;
                }
            }
            match args.status {
                Some(StatusFilter::Online) if !cam.is_online => return false,
                Some(StatusFilter::Offline) if cam.is_online => return false,
                _ => {}
            }
            if let Some(vendor) = &args.vendor {
                if cam.vendor_name() != vendor {
                    return false;
                }
            }
            if let Some(dc) = &args.dc {
                if cam.dc_name() != dc {
                    return false;
                }
            }
            true
        })
        .collect();

    if filtered.is_empty() {
        msg_print!(Message::NoCamerasMatched);
        return Ok(());
    }

    let total = filtered.len();
    let total_pages = total.div_ceil(ITEMS_PER_PAGE).max(1);
    let page = args.page.clamp(1, total_pages);
    let start = (page - 1) * ITEMS_PER_PAGE;
    let page_cameras = &filtered[start..(start + ITEMS_PER_PAGE).min(total)];

    View::cameras(page_cameras)?;
    println!("Page {} of {} ({} cameras)", page, total_pages, total);
    Ok(())
}
