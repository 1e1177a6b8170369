use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::{ConfigStore, StoreError};

pub const USER_ID_KEY: &str = "user_id";
pub const ACCESS_TOKEN_KEY: &str = "access_token";

pub const MAX_COUNT: u32 = 33;
pub const MAX_DIMENSION: u32 = 2048;

/// Instagram API credentials as saved through the site settings form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub access_token: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn load(store: &dyn ConfigStore) -> Self {
        Self {
            user_id: store.get(USER_ID_KEY),
            access_token: store.get(ACCESS_TOKEN_KEY),
        }
    }

    /// Stages both keys on the store. Callers still have to `save()`.
    pub fn stage(&self, store: &dyn ConfigStore) {
        store.set(USER_ID_KEY, &self.user_id);
        store.set(ACCESS_TOKEN_KEY, &self.access_token);
    }

    /// Stages and saves both keys. A failed save restores the values the
    /// store held before, so nothing unsaved stays visible.
    pub fn persist(&self, store: &dyn ConfigStore) -> Result<(), StoreError> {
        let previous = Credentials::load(store);
        self.stage(store);

        store.save().map_err(|e| {
            previous.stage(store);
            e
        })
    }

    // Fetching is disabled until both values are set
    pub fn is_complete(&self) -> bool {
        !self.user_id.is_empty() && !self.access_token.is_empty()
    }

    /// `.` and `..` are dot segments and can never appear in a request path.
    pub fn has_addressable_user_id(&self) -> bool {
        !matches!(self.user_id.as_str(), "." | "..")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.access_token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("access_token", &token)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub count: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            count: 20,
            width: 150,
            height: 150,
        }
    }
}

impl DisplayConfig {
    /// Checks the bounds applied wherever a display config enters the system.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_COUNT).contains(&self.count) {
            return Err(format!("count must be between 1 and {}", MAX_COUNT));
        }
        if !(1..=MAX_DIMENSION).contains(&self.width) {
            return Err(format!("width must be between 1 and {}", MAX_DIMENSION));
        }
        if !(1..=MAX_DIMENSION).contains(&self.height) {
            return Err(format!("height must be between 1 and {}", MAX_DIMENSION));
        }
        Ok(())
    }
}

/// One fetched media item, normalized for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub id: String,
    pub link: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
}

// Shapes of the recent media payload, only the fields the block reads
#[derive(Debug, Deserialize)]
pub struct RecentMediaResponse {
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub link: String,
    pub images: MediaImages,
}

#[derive(Debug, Deserialize)]
pub struct MediaImages {
    pub thumbnail: ImageResource,
}

#[derive(Debug, Deserialize)]
pub struct ImageResource {
    pub url: String,
}

impl MediaItem {
    pub fn into_entry(self, display: &DisplayConfig) -> ImageEntry {
        ImageEntry {
            id: self.id,
            link: self.link,
            thumbnail_url: self.images.thumbnail.url,
            width: display.width,
            height: display.height,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub data: Vec<ImageEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryConfigStore, TomlConfigStore};

    #[test]
    fn credentials_default_to_empty_and_incomplete() {
        let store = MemoryConfigStore::new();
        let credentials = Credentials::load(&store);
        assert_eq!(credentials, Credentials::default());
        assert!(!credentials.is_complete());
    }

    #[test]
    fn credentials_need_both_values() {
        assert!(!Credentials::new("460786510", "").is_complete());
        assert!(!Credentials::new("", "token").is_complete());
        assert!(Credentials::new("460786510", "token").is_complete());
    }

    #[test]
    fn credentials_round_trip_through_store() {
        let store = MemoryConfigStore::new();
        let credentials = Credentials::new("460786510", "460786509.ab103e5.a54b");
        credentials.stage(&store);
        assert_eq!(Credentials::load(&store), credentials);
    }

    #[test]
    fn failed_persist_restores_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let store = TomlConfigStore::open(&path).unwrap();
        Credentials::new("460786510", "old-token").persist(&store).unwrap();

        // A directory in place of the file makes the next save fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = Credentials::new("42", "new-token").persist(&store);
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(Credentials::load(&store), Credentials::new("460786510", "old-token"));
    }

    #[test]
    fn dot_segment_user_ids_are_not_addressable() {
        assert!(!Credentials::new(".", "t").has_addressable_user_id());
        assert!(!Credentials::new("..", "t").has_addressable_user_id());
        assert!(Credentials::new("...", "t").has_addressable_user_id());
        assert!(Credentials::new("460786510", "t").has_addressable_user_id());
    }

    #[test]
    fn debug_output_hides_token() {
        let credentials = Credentials::new("42", "very-secret-token");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("42"));
        assert!(!printed.contains("very-secret-token"));
    }

    #[test]
    fn display_config_bounds() {
        assert!(DisplayConfig::default().validate().is_ok());
        assert!(DisplayConfig { count: 0, ..Default::default() }.validate().is_err());
        assert!(DisplayConfig { count: MAX_COUNT + 1, ..Default::default() }.validate().is_err());
        assert!(DisplayConfig { width: 0, ..Default::default() }.validate().is_err());
        assert!(DisplayConfig { height: MAX_DIMENSION + 1, ..Default::default() }.validate().is_err());
        assert!(DisplayConfig { count: MAX_COUNT, width: MAX_DIMENSION, height: 1 }.validate().is_ok());
    }

    #[test]
    fn image_entry_serializes_camel_case() {
        let entry = ImageEntry {
            id: "1".to_string(),
            link: "https://x/1".to_string(),
            thumbnail_url: "https://x/1.jpg".to_string(),
            width: 150,
            height: 150,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["thumbnailUrl"], "https://x/1.jpg");
    }
}
