#[macro_use]
extern crate rocket;

use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use instagram_block::api;
use instagram_block::config::AppConfig;
use instagram_block::http::ReqwestClient;
use log::info;
use rocket::figment::{
    providers::{Format, Toml},
    Figment, Profile,
};
use rocket::Config;

#[launch]
fn rocket() -> _ {
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Load config
    let mut figment = Figment::from(Config::default())
        .merge(Toml::file("App.toml").nested());

    if let Ok(path) = env::var("INSTAGRAM_SETTINGS_PATH") {
        figment = figment.merge(("settings_path", path));
    }

    if let Ok(base_url) = env::var("INSTAGRAM_API_BASE_URL") {
        figment = figment.merge(("api_base_url", base_url));
    }

    if let Ok(client_id) = env::var("INSTAGRAM_CLIENT_ID") {
        figment = figment.merge(("oauth.client_id", client_id));
    }

    figment = figment.select(Profile::from_env_or("APP_PROFILE", "default"));

    let config = figment
        .extract::<AppConfig>()
        .unwrap_or_else(|e| panic!("Invalid configuration: {}", e));
    info!("Configuration loaded successfully");

    let client = ReqwestClient::new(config.timeout, &config.user_agent)
        .unwrap_or_else(|e| panic!("Failed to build HTTP client: {}", e));
    let store = api::open_store(&config)
        .unwrap_or_else(|e| panic!("Failed to open Instagram settings: {}", e));

    info!(
        "Starting Instagram block service on {}:{} (timeout {}s)",
        config.address, config.port, config.timeout
    );

    api::register(rocket::custom(figment), config, Arc::new(client), store)
        .unwrap_or_else(|e| panic!("Failed to register Instagram block: {}", e))
}
