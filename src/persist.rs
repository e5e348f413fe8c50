use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::SaveError;
use crate::save::{decode, encode, save_key, SaveData, SaveStore};

/// Saves kept in the browser's `localStorage`, one entry per aphid.
pub struct BrowserStore {
    prefix: String,
}

fn storage_error(e: JsValue) -> SaveError {
    SaveError::Storage(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl BrowserStore {
    pub fn new(prefix: &str) -> Self {
        BrowserStore {
            prefix: prefix.into(),
        }
    }

    fn storage(&self) -> Result<Storage, SaveError> {
        let window =
            web_sys::window().ok_or_else(|| SaveError::Storage("no window".into()))?;
        window
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| SaveError::Storage("localStorage disabled".into()))
    }
}

impl SaveStore for BrowserStore {
    fn list(&self) -> Vec<String> {
        let storage = match self.storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("{}", e);
                return Vec::new();
            }
        };
        let count = storage.length().unwrap_or(0);
        let mut names: Vec<String> = (0..count)
            .filter_map(|i| storage.key(i).ok().flatten())
            .filter_map(|key| key.strip_prefix(&self.prefix).map(|s| s.to_string()))
            .collect();
        names.sort();
        names
    }

    fn load(&self, name: &str) -> Result<SaveData, SaveError> {
        let blob = self
            .storage()?
            .get_item(&format!("{}{}", self.prefix, name))
            .map_err(storage_error)?
            .ok_or_else(|| SaveError::NotFound(name.into()))?;
        decode(&blob)
    }

    fn save(&mut self, data: &SaveData) -> Result<String, SaveError> {
        let key = save_key(&data.seed_system.aphid.name);
        let blob = encode(data)?;
        self.storage()?
            .set_item(&format!("{}{}", self.prefix, key), &blob)
            .map_err(storage_error)?;
        Ok(key)
    }
}
