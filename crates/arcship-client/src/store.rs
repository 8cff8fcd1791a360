//! Client id persistence and the offline stand-in for the server handshake.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arcship_core::identity::{IdStore, ServerLink};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("id file i/o: {0}")]
    Io(#[from] io::Error),

    #[error("id file is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),
}

/// [`IdStore`] backed by a JSON object on disk, `{ "<key>": "<id>" }`.
#[derive(Debug, Clone)]
pub struct FileIdStore {
    path: PathBuf,
}

impl FileIdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn try_load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.remove(key))
    }

    pub fn try_save(&self, key: &str, id: &str) -> Result<(), StoreError> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), id.to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

impl IdStore for FileIdStore {
    fn load(&self, key: &str) -> Option<String> {
        self.try_load(key).unwrap_or_else(|error| {
            warn!(path = %self.path.display(), %error, "ignoring unreadable id file");
            None
        })
    }

    fn save(&mut self, key: &str, id: &str) {
        if let Err(error) = self.try_save(key, id) {
            warn!(path = %self.path.display(), %error, "client id not persisted");
        }
    }
}

/// Answers `identify` locally when no server is reachable.
///
/// A returning client keeps its stored id; a new one gets a random id.
#[derive(Debug, Default)]
pub struct OfflineLink {
    requested: Option<String>,
}

impl OfflineLink {
    /// The id the server would send back in `register`.
    pub fn assign<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        match self.requested.take() {
            Some(id) => id,
            None => {
                let id = format!("p-{:08x}", rng.gen::<u32>());
                info!(%id, "assigned new client id");
                id
            }
        }
    }
}

impl ServerLink for OfflineLink {
    fn send_identify(&mut self, id: Option<&str>) {
        debug!(?id, "identify (offline)");
        self.requested = id.map(str::to_owned);
    }
}
