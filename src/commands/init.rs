use crate::libs::config::{Config, CONFIG_FILE_NAME};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::init()?;
    config.save()?;

    let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));
    Ok(())
}
