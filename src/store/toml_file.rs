use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use parking_lot::RwLock;
use tempfile::NamedTempFile;

use super::{ConfigStore, StoreError, SETTINGS_NAMESPACE};

/// Settings persisted in a TOML file, one table per namespace.
///
/// Other tables found in the file are left untouched on save.
pub struct TomlConfigStore {
    path: PathBuf,
    namespace: String,
    values: RwLock<BTreeMap<String, String>>,
}

impl TomlConfigStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_namespace(path, SETTINGS_NAMESPACE)
    }

    pub fn open_namespace(path: impl AsRef<Path>, namespace: &str) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let document = read_document(&path)?;

        let mut values = BTreeMap::new();
        if let Some(section) = document.get(namespace) {
            let table = section
                .as_table()
                .ok_or_else(|| StoreError::InvalidNamespace(namespace.to_string()))?;
            for (key, value) in table {
                // Settings are plain strings; anything else is kept in its TOML form
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                values.insert(key.clone(), value);
            }
        }

        info!(
            "Loaded {} setting(s) for '{}' from {}",
            values.len(),
            namespace,
            path.display()
        );

        Ok(Self {
            path,
            namespace: namespace.to_string(),
            values: RwLock::new(values),
        })
    }
}

fn read_document(path: &Path) -> Result<toml::Table, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.parse::<toml::Table>()?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No settings file at {}, starting empty", path.display());
            Ok(toml::Table::new())
        }
        Err(e) => Err(e.into()),
    }
}

// Readers see either the old file or the new one, never a partial write
fn write_atomically(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl ConfigStore for TomlConfigStore {
    fn get(&self, key: &str) -> String {
        let values = self.values.read();
        values.get(key).cloned().unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
    }

    fn save(&self) -> Result<(), StoreError> {
        let mut document = read_document(&self.path)?;

        let section: toml::Table = self
            .values
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), toml::Value::String(v.clone())))
            .collect();
        document.insert(self.namespace.clone(), toml::Value::Table(section));

        let content = toml::to_string_pretty(&document)?;
        write_atomically(&self.path, content.as_bytes())?;

        info!("Saved '{}' settings to {}", self.namespace, self.path.display());
        Ok(())
    }
}
