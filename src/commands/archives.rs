use crate::api::models::ArchiveStatus;
use crate::libs::config::Config;
use crate::libs::fleet::Fleet;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_print};
use anyhow::Result;
use clap::Args;

const ITEMS_PER_PAGE: u32 = 50;

#[derive(Debug, Args)]
pub struct ArchivesArgs {
    #[arg(long, help = "Filter by status: NEW, ENQUEUED, ERROR or DONE")]
    status: Option<String>,
    #[arg(long, default_value_t = 1, help = "Result page")]
    page: u32,
}

pub async fn cmd(args: ArchivesArgs) -> Result<()> {
    let config = Config::read()?;
    if config.api.api_key.is_empty() {
        msg_bail_anyhow!(Message::ApiKeyMissing);
    }

    let status = args
        .status
        .as_deref()
        .map(|label| {
            ArchiveStatus::from_label(label)
                .ok_or_else(|| msg_error_anyhow!(Message::UnknownArchiveStatus(label.to_string())))
        })
        .transpose()?;

    let fleet = Fleet::new(&config)?;
    let page = args.page.max(1);
    let offset = (page - 1) * ITEMS_PER_PAGE;
    let mut archives = fleet.client().get_baked_archives(offset, ITEMS_PER_PAGE).await?;

    let has_next = archives.len() as u32 == ITEMS_PER_PAGE;
    if let Some(status) = status {
        archives.retain(|a| a.status == status);
    }

    if archives.is_empty() {
        msg_print!(Message::NoArchivesFound);
        return Ok(());
    }

    View::archives(&archives)?;
    if has_next {
        println!("Page {} (more available: --page {})", page, page + 1);
    } else {
        println!("Page {}", page);
    }
    Ok(())
}
