use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::feed::DEFAULT_API_BASE_URL;
use crate::models::DisplayConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL '{0}': {1}")]
    InvalidApiBase(String, String),

    #[error("Invalid OAuth authorize URL '{0}': {1}")]
    InvalidAuthorizeUrl(String, String),

    #[error("Invalid default block settings: {0}")]
    InvalidBlock(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub address: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    // In-memory settings when unset
    pub settings_path: Option<String>,
    #[serde(default)]
    pub block: DisplayConfig,
    #[serde(default)]
    pub oauth: OAuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfig {
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            authorize_url: default_authorize_url(),
            client_id: None,
            redirect_uri: None,
        }
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("instagram-block/{}", env!("CARGO_PKG_VERSION"))
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_authorize_url() -> String {
    "https://instagram.com/oauth/authorize/".to_string()
}

impl AppConfig {
    /// Checks everything the service would otherwise only trip over at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_base()?;
        self.oauth.authorize_link()?;
        self.block.validate().map_err(ConfigError::InvalidBlock)
    }

    pub fn api_base(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| ConfigError::InvalidApiBase(self.api_base_url.clone(), e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiBase(
                self.api_base_url.clone(),
                "URL cannot carry a path".to_string(),
            ));
        }
        Ok(url)
    }
}

impl OAuthConfig {
    /// Link to Instagram's authorization page shown on the settings form.
    ///
    /// The query is only added when a client id is configured; the bare page is
    /// linked otherwise.
    pub fn authorize_link(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.authorize_url)
            .map_err(|e| ConfigError::InvalidAuthorizeUrl(self.authorize_url.clone(), e.to_string()))?;

        if let Some(client_id) = self.client_id.as_deref().filter(|id| !id.is_empty()) {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", client_id);
            if let Some(redirect_uri) = &self.redirect_uri {
                query.append_pair("redirect_uri", redirect_uri);
            }
            query.append_pair("response_type", "code");
        }

        Ok(url)
    }
}
