mod memory;
mod toml_file;

pub use memory::MemoryConfigStore;
pub use toml_file::TomlConfigStore;

use thiserror::Error;

/// Namespace every block setting is stored under.
pub const SETTINGS_NAMESPACE: &str = "instagram_block.settings";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Settings namespace '{0}' is not a table")]
    InvalidNamespace(String),
}

/// Key/value settings storage the block reads its credentials from.
///
/// `set` only stages a value; nothing is guaranteed to outlive the process
/// until `save` returns `Ok`.
pub trait ConfigStore: Send + Sync {
    /// Returns the stored value, or an empty string when the key is unset.
    fn get(&self, key: &str) -> String;

    fn set(&self, key: &str, value: &str);

    fn save(&self) -> Result<(), StoreError>;
}
