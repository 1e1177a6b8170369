use std::collections::HashMap;
use parking_lot::RwLock;

use super::{ConfigStore, StoreError};

// Process-local settings, lost on restart
#[derive(Default)]
pub struct MemoryConfigStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values.write().insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> String {
        let values = self.values.read();
        values.get(key).cloned().unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
    }

    fn save(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_reads_as_empty() {
        let store = MemoryConfigStore::new();
        assert_eq!(store.get("user_id"), "");
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = MemoryConfigStore::new().with_value("user_id", "1");
        store.set("user_id", "2");
        assert!(store.save().is_ok());
        assert_eq!(store.get("user_id"), "2");
    }
}
