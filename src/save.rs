//! Save games: JSON, deflated, then base64 so any string store can hold them.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::progress::Progress;
use crate::session::SeedSystem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub seed_system: SeedSystem,
    pub progress: Progress,
}

pub fn save_key(aphid_name: &str) -> String {
    aphid_name.replace(' ', "_")
}

pub fn encode(data: &SaveData) -> Result<String, SaveError> {
    let json = serde_json::to_vec(data).map_err(|e| SaveError::Encode(e.to_string()))?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| SaveError::Encode(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| SaveError::Encode(e.to_string()))?;
    Ok(STANDARD.encode(compressed))
}

pub fn decode(blob: &str) -> Result<SaveData, SaveError> {
    let compressed = STANDARD
        .decode(blob.trim())
        .map_err(|e| SaveError::Corrupted(e.to_string()))?;
    let mut json = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(|e| SaveError::Corrupted(e.to_string()))?;
    let mut data: SaveData =
        serde_json::from_slice(&json).map_err(|e| SaveError::Corrupted(e.to_string()))?;
    data.seed_system.clear_active();
    Ok(data)
}

pub trait SaveStore {
    /// Names of every stored save, sorted.
    fn list(&self) -> Vec<String>;
    fn load(&self, name: &str) -> Result<SaveData, SaveError>;
    /// Store `data` under its aphid's key, replacing any older save.
    fn save(&mut self, data: &SaveData) -> Result<String, SaveError>;
}

/// Saves kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&mut self, name: &str, blob: &str) {
        self.blobs.insert(name.into(), blob.into());
    }
}

impl SaveStore for MemoryStore {
    fn list(&self) -> Vec<String> {
        self.blobs.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Result<SaveData, SaveError> {
        let blob = self
            .blobs
            .get(name)
            .ok_or_else(|| SaveError::NotFound(name.into()))?;
        decode(blob)
    }

    fn save(&mut self, data: &SaveData) -> Result<String, SaveError> {
        let key = save_key(&data.seed_system.aphid.name);
        let blob = encode(data)?;
        self.blobs.insert(key.clone(), blob);
        Ok(key)
    }
}

/// Save and turn the outcome into a console line.
pub fn save_status(store: &mut dyn SaveStore, data: &SaveData) -> String {
    match store.save(data) {
        Ok(key) => {
            log::info!("saved game {}", key);
            format!("Saved game data: {}", key)
        }
        Err(e) => {
            log::warn!("save failed: {}", e);
            format!("Could not save game data: {}", e)
        }
    }
}
