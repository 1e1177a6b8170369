use std::sync::Arc;

use log::{debug, error, info};
use reqwest::Url;
use thiserror::Error;

use crate::http::{HttpClient, TransportError};
use crate::models::instagram::{MediaItem, RecentMediaResponse};
use crate::models::{Credentials, DisplayConfig, ImageEntry};
use crate::store::ConfigStore;

pub const DEFAULT_API_BASE_URL: &str = "https://api.instagram.com/v1";

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Fetch error for {url}: {source}")]
    FetchError {
        // Access token already stripped
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Malformed response{}: {reason}", item_suffix(.index))]
    MalformedResponseError {
        index: Option<usize>,
        reason: String,
    },

    #[error("Instagram user id '{user_id}' cannot be used as a URL path segment")]
    InvalidUserIdError { user_id: String },
}

fn item_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" at media item {}", i)).unwrap_or_default()
}

/// Fetches a user's recent media from the Instagram API.
pub struct FeedFetcher {
    client: Arc<dyn HttpClient>,
    store: Arc<dyn ConfigStore>,
    api_base: Url,
}

impl FeedFetcher {
    pub fn new(client: Arc<dyn HttpClient>, store: Arc<dyn ConfigStore>, api_base: Url) -> Self {
        Self {
            client,
            store,
            api_base,
        }
    }

    /// Reads the current credentials from the store and fetches with them.
    pub async fn fetch_for_block(&self, display: &DisplayConfig) -> Result<Vec<ImageEntry>, FeedError> {
        let credentials = Credentials::load(self.store.as_ref());
        self.fetch_recent_media(&credentials, display).await
    }

    pub async fn fetch_recent_media(
        &self,
        credentials: &Credentials,
        display: &DisplayConfig,
    ) -> Result<Vec<ImageEntry>, FeedError> {
        if !credentials.is_complete() {
            debug!("Instagram credentials not configured, skipping fetch");
            return Ok(Vec::new());
        }

        if !credentials.has_addressable_user_id() {
            error!("Refusing to fetch for Instagram user id '{}'", credentials.user_id);
            return Err(FeedError::InvalidUserIdError {
                user_id: credentials.user_id.clone(),
            });
        }

        let url = self.recent_media_url(credentials, display);
        info!(
            "Fetching {} recent media item(s) for Instagram user {}",
            display.count, credentials.user_id
        );

        let response = match self.client.get(&url).await {
            Ok(response) => response,
            Err(source) => return Err(fetch_error(&url, source)),
        };

        if !response.is_success() {
            return Err(fetch_error(&url, TransportError::Status(response.status)));
        }

        let entries = parse_recent_media(&response.body, display)?;
        debug!("Decoded {} media item(s)", entries.len());

        Ok(entries)
    }

    /// `{api_base}/users/{user_id}/media/recent/?access_token=..&count=..`
    ///
    /// A `.` or `..` user id would be dropped from the path, callers check
    /// `Credentials::has_addressable_user_id` first.
    pub fn recent_media_url(&self, credentials: &Credentials, display: &DisplayConfig) -> Url {
        let mut url = self.api_base.clone();

        // A base URL that cannot hold a path was rejected when the config was loaded
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(&["users", credentials.user_id.as_str(), "media", "recent", ""]);
        }

        url.query_pairs_mut()
            .append_pair("access_token", &credentials.access_token)
            .append_pair("count", &display.count.to_string());

        url
    }
}

fn fetch_error(url: &Url, source: TransportError) -> FeedError {
    let url = redact_url(url);
    error!("Instagram request to {} failed: {}", url, source);
    FeedError::FetchError { url, source }
}

/// The URL with its `access_token` pair removed, safe for logs and errors.
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "access_token")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        redacted.set_query(None);
    } else {
        redacted.query_pairs_mut().clear().extend_pairs(kept);
    }

    redacted.to_string()
}

/// Maps a recent media payload onto entries, all or nothing.
pub fn parse_recent_media(body: &str, display: &DisplayConfig) -> Result<Vec<ImageEntry>, FeedError> {
    let response: RecentMediaResponse =
        serde_json::from_str(body).map_err(|e| FeedError::MalformedResponseError {
            index: None,
            reason: e.to_string(),
        })?;

    response
        .data
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<MediaItem>(item)
                .map(|media| media.into_entry(display))
                .map_err(|e| FeedError::MalformedResponseError {
                    index: Some(index),
                    reason: e.to_string(),
                })
        })
        .collect()
}
