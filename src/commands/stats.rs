use crate::libs::config::Config;
use crate::libs::fleet::Fleet;
use crate::libs::messages::Message;
use crate::libs::stats::compute_summary;
use crate::libs::view::View;
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::Utc;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    if config.api.api_key.is_empty() {
        msg_bail_anyhow!(Message::ApiKeyMissing);
    }

    let fleet = Fleet::new(&config)?;
    let cameras = fleet.cameras().await?;
    let health = fleet.health().await;

    let summary = compute_summary(&cameras, Utc::now().timestamp());
    View::summary(&summary, &health)
}
