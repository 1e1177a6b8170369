mod error;
pub mod instagram;

pub use error::ApiError;

use std::sync::Arc;

use log::info;
use rocket::{Build, Rocket};
use thiserror::Error;

use crate::block::{BlockInstance, BLOCK_ID, BLOCK_LABEL};
use crate::config::{AppConfig, ConfigError};
use crate::feed::FeedFetcher;
use crate::http::{HttpClient, TransportError};
use crate::render::{HtmlRenderer, Renderer};
use crate::store::{ConfigStore, MemoryConfigStore, StoreError, TomlConfigStore};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Settings file when one is configured, process memory otherwise.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn ConfigStore>, StoreError> {
    match &config.settings_path {
        Some(path) => Ok(Arc::new(TomlConfigStore::open(path)?)),
        None => {
            info!("No settings_path configured, Instagram settings are kept in memory");
            Ok(Arc::new(MemoryConfigStore::new()))
        }
    }
}

/// Declares the block to the service: manages its state and mounts its routes.
pub fn register(
    rocket: Rocket<Build>,
    config: AppConfig,
    client: Arc<dyn HttpClient>,
    store: Arc<dyn ConfigStore>,
) -> Result<Rocket<Build>, StartupError> {
    config.validate()?;

    let fetcher = FeedFetcher::new(client, store.clone(), config.api_base()?);
    let block = BlockInstance::new(config.block);
    let renderer: Box<dyn Renderer> = Box::new(HtmlRenderer::default());

    info!("Registering block '{}' ({})", BLOCK_ID, BLOCK_LABEL);

    Ok(rocket
        .manage(fetcher)
        .manage(block)
        .manage(renderer)
        .manage(store)
        .manage(config)
        .mount(
            "/instagram",
            routes![
                instagram::get_block,
                instagram::get_feed,
                instagram::get_stylesheet,
                instagram::get_settings,
                instagram::save_settings,
                instagram::get_block_settings,
                instagram::save_block_settings,
            ],
        ))
}
